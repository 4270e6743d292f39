//! Medical history: allergies, chronic conditions, and past procedures.
//!
//! Each sub-collection is an ordered sequence; the order is display order
//! only and carries no ranking semantics.

use serde::{Deserialize, Serialize};

/// A documented allergy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Allergy {
    pub allergen: String,
    pub reaction: String,
    /// Free-text severity grade, e.g. "Mild", "Moderate", "Severe".
    pub severity: String,
}

/// A chronic condition under ongoing management.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChronicCondition {
    pub condition: String,
    pub diagnosed_date: String,
    /// E.g. "Active", "Resolved", "In remission".
    pub status: String,
    /// Names of the medications associated with this condition.
    ///
    /// These are display names only; the authoritative dosing data lives in
    /// `PatientSummary::current_medications`.
    pub medications: Vec<String>,
}

/// A past surgical procedure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Procedure {
    pub procedure: String,
    pub date: String,
    pub complications: String,
}

/// The patient's full medical history.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicalHistory {
    pub allergies: Vec<Allergy>,
    pub chronic_conditions: Vec<ChronicCondition>,
    pub surgical_history: Vec<Procedure>,
}
