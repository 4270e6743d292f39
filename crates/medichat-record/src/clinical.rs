//! Clinical data: medications, encounters, vitals, and lab results.

use serde::{Deserialize, Serialize};

/// A currently prescribed medication.
///
/// Belongs to exactly one patient; there is no cross-patient sharing in
/// this system.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Medication {
    pub name: String,
    pub dosage: String,
    pub frequency: String,
    pub start_date: String,
    pub prescribed_by: String,
}

/// One clinical encounter.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Visit {
    pub date: String,
    /// Encounter type, e.g. "Follow-up", "Annual physical".
    #[serde(rename = "type")]
    pub visit_type: String,
    pub provider: String,
    pub chief_complaint: String,
    pub assessment: String,
    pub plan: String,
}

/// The single latest vital-signs snapshot.
///
/// This is not a time series — the record carries exactly one snapshot,
/// stamped with the date it was recorded. All readings are display strings
/// except `bmi`, which stays numeric because the dispatcher derives a
/// weight classification from it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VitalSigns {
    pub last_recorded: String,
    pub blood_pressure: String,
    pub heart_rate: String,
    pub temperature: String,
    pub weight: String,
    pub height: String,
    pub bmi: f64,
}

/// One laboratory result.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabResult {
    pub date: String,
    pub test: String,
    pub result: String,
    /// The reference range the result is judged against, e.g. "70-99 mg/dL".
    pub reference: String,
    /// Status flag, e.g. "Normal", "High", "Low".
    pub status: String,
}
