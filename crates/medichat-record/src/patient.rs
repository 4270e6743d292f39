//! Patient identity.

use serde::{Deserialize, Serialize};

/// Identity fields for the single patient this process serves.
///
/// Immutable for the session lifetime. The `id` is the record document's
/// own stable identifier and appears in log fields; the `mrn` is the
/// human-facing medical record number shown in the UI.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    pub id: String,
    pub name: String,
    pub age: u32,
    pub gender: String,
    pub date_of_birth: String,
    pub mrn: String,
}
