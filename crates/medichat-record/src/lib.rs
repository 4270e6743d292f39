//! # medichat-record
//!
//! Patient record domain types for medichat.
//!
//! The record is an externally supplied, pre-validated JSON document
//! describing one patient: identity, medical history, current medications,
//! recent visits, the latest vital-signs snapshot, and lab results. This
//! crate defines the typed shape of that document and the loaders that
//! produce it. No business logic lives here — the response dispatcher and
//! the conversation session read these types but never write them.

pub mod clinical;
pub mod error;
pub mod history;
pub mod patient;
pub mod summary;

pub use clinical::{LabResult, Medication, VitalSigns, Visit};
pub use error::{RecordError, RecordResult};
pub use history::{Allergy, ChronicCondition, MedicalHistory, Procedure};
pub use patient::Patient;
pub use summary::PatientSummary;
