//! Transcript message types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier of one transcript message.
///
/// Assigned monotonically by the owning session, starting at 0. Unique and
/// strictly increasing within a session; carries no meaning across
/// sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MessageId(pub u64);

/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One entry in the conversation transcript.
///
/// Created by the session, never mutated after creation, retained for the
/// session lifetime. There is no eviction and no persistence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: MessageId,
    pub role: Role,
    pub content: String,
    /// Wall-clock creation time (UTC).
    pub timestamp: DateTime<Utc>,
    /// Optional free-text provenance note, e.g. "Initial greeting".
    pub provenance: Option<String>,
}
