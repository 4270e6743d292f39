//! The `PatientSummary` aggregate root and its loaders.
//!
//! A `PatientSummary` is loaded exactly once at process start — from the
//! embedded demo document or from a caller-supplied file — and is never
//! mutated afterwards. Front-ends share it by read-only reference
//! (`Arc<PatientSummary>`); every chat answer is derived from it, never
//! written back.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    clinical::{LabResult, Medication, VitalSigns, Visit},
    error::{RecordError, RecordResult},
    history::MedicalHistory,
    patient::Patient,
};

/// The embedded demo record. Entirely fictional; no real patient data.
const DEMO_RECORD: &str = include_str!("../data/demo_patient.json");

/// The full record for the single patient this process serves.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientSummary {
    pub patient: Patient,
    pub medical_history: MedicalHistory,
    pub current_medications: Vec<Medication>,
    pub recent_visits: Vec<Visit>,
    pub vital_signs: VitalSigns,
    pub lab_results: Vec<LabResult>,
}

impl PatientSummary {
    /// Parse `s` as a patient record document.
    ///
    /// Returns `RecordError::ParseFailed` if the document is not valid JSON
    /// or does not match the record shape. The record is treated as
    /// pre-validated beyond this — no semantic checks are performed here.
    pub fn from_json_str(s: &str) -> RecordResult<Self> {
        let summary: PatientSummary =
            serde_json::from_str(s).map_err(|e| RecordError::ParseFailed {
                reason: e.to_string(),
            })?;

        info!(
            patient_id = %summary.patient.id,
            mrn = %summary.patient.mrn,
            "patient record loaded"
        );

        Ok(summary)
    }

    /// Read the file at `path` and parse it as a patient record document.
    pub fn from_file(path: &Path) -> RecordResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| RecordError::ReadFailed {
            reason: format!("'{}': {}", path.display(), e),
        })?;
        Self::from_json_str(&contents)
    }

    /// The embedded demo record.
    ///
    /// # Panics
    ///
    /// Panics if the embedded document fails to parse — which cannot happen
    /// for the document compiled into this crate.
    pub fn demo() -> Self {
        Self::from_json_str(DEMO_RECORD).expect("embedded demo record must parse")
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::PatientSummary;
    use crate::error::RecordError;

    /// The embedded demo record parses and exposes the expected identity.
    #[test]
    fn demo_record_parses() {
        let record = PatientSummary::demo();
        assert_eq!(record.patient.name, "Sarah Mitchell");
        assert_eq!(record.patient.mrn, "MRN-482917");
        assert_eq!(record.current_medications.len(), 3);
        assert_eq!(record.medical_history.allergies.len(), 2);
        assert_eq!(record.recent_visits.len(), 2);
        assert_eq!(record.lab_results.len(), 4);
        assert!((record.vital_signs.bmi - 28.1).abs() < f64::EPSILON);
    }

    /// The record document round-trips through serde with camelCase keys.
    #[test]
    fn record_round_trips_with_camel_case_keys() {
        let record = PatientSummary::demo();
        let json = serde_json::to_string(&record).unwrap();

        // Wire keys stay camelCase.
        assert!(json.contains("\"medicalHistory\""));
        assert!(json.contains("\"currentMedications\""));
        assert!(json.contains("\"chiefComplaint\""));
        assert!(json.contains("\"lastRecorded\""));
        assert!(json.contains("\"type\""));

        let decoded = PatientSummary::from_json_str(&json).unwrap();
        assert_eq!(decoded.patient.id, record.patient.id);
        assert_eq!(
            decoded.recent_visits[0].visit_type,
            record.recent_visits[0].visit_type
        );
    }

    /// A document missing a required field is a ParseFailed error, not a panic.
    #[test]
    fn missing_field_is_parse_error() {
        let result = PatientSummary::from_json_str(r#"{ "patient": { "name": "X" } }"#);
        match result {
            Err(RecordError::ParseFailed { reason }) => {
                assert!(!reason.is_empty());
            }
            other => panic!("expected ParseFailed, got {:?}", other),
        }
    }

    /// Malformed JSON is a ParseFailed error.
    #[test]
    fn malformed_json_is_parse_error() {
        assert!(matches!(
            PatientSummary::from_json_str("not json"),
            Err(RecordError::ParseFailed { .. })
        ));
    }

    /// A nonexistent file is a ReadFailed error naming the path.
    #[test]
    fn missing_file_is_read_error() {
        let result = PatientSummary::from_file(std::path::Path::new("/no/such/record.json"));
        match result {
            Err(RecordError::ReadFailed { reason }) => {
                assert!(reason.contains("/no/such/record.json"));
            }
            other => panic!("expected ReadFailed, got {:?}", other),
        }
    }

    /// Empty collections deserialize fine — the record shape does not
    /// require any sub-collection to be non-empty.
    #[test]
    fn empty_collections_are_valid() {
        let record = PatientSummary::demo();
        let mut value = serde_json::to_value(&record).unwrap();
        value["currentMedications"] = serde_json::json!([]);
        value["labResults"] = serde_json::json!([]);
        value["medicalHistory"]["allergies"] = serde_json::json!([]);

        let decoded = PatientSummary::from_json_str(&value.to_string()).unwrap();
        assert!(decoded.current_medications.is_empty());
        assert!(decoded.lab_results.is_empty());
        assert!(decoded.medical_history.allergies.is_empty());
    }
}
