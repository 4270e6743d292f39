//! The conversation session: append-only transcript plus round-trip protocol.
//!
//! A session owns the ordered message sequence and the single outstanding
//! round trip. Time never flows inside the session — callers pass `Instant`
//! values into `submit` and `poll_reply`, which makes the session a
//! deterministic state machine driven by the host event loop. The scheduled
//! reply is plain data owned by the session, so tearing the session down
//! drops the pending reply with it; a reply can never be appended to a dead
//! session.

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;

use medichat_dispatch::{greeting, respond};
use medichat_record::PatientSummary;

use crate::{
    delay::DelayPolicy,
    message::{ChatMessage, MessageId, Role},
};

/// Provenance note attached to the opening assistant message.
pub const GREETING_PROVENANCE: &str = "Initial greeting";

/// Provenance note attached to every dispatched assistant reply.
pub const ANALYSIS_PROVENANCE: &str = "Medical record analysis";

/// Unique identifier for one conversation session.
///
/// Appears in every structured log event the session emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(pub Uuid);

impl SessionId {
    /// Create a new, unique session ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// The one scheduled assistant reply, snapshotted at submission time.
#[derive(Debug, Clone)]
struct PendingReply {
    /// The user text the dispatcher will answer.
    utterance: String,
    /// When the reply becomes deliverable.
    due_at: Instant,
}

/// An in-memory conversation over one fixed patient record.
///
/// The transcript is append-only: messages are never mutated or removed,
/// and identifiers are assigned from a monotonic counter. At most one
/// round trip is outstanding at a time — `submit` refuses further input
/// while a reply is pending, which is the only concurrency control this
/// system needs.
pub struct ConversationSession {
    id: SessionId,
    record: Arc<PatientSummary>,
    delay: DelayPolicy,
    messages: Vec<ChatMessage>,
    next_id: u64,
    pending: Option<PendingReply>,
}

impl ConversationSession {
    /// Start a session over `record`.
    ///
    /// The transcript starts pre-populated with one assistant greeting
    /// naming the patient, tagged [`GREETING_PROVENANCE`].
    pub fn new(record: Arc<PatientSummary>, delay: DelayPolicy) -> Self {
        let mut session = Self {
            id: SessionId::new(),
            record,
            delay,
            messages: Vec::new(),
            next_id: 0,
            pending: None,
        };

        let opening = greeting(&session.record);
        session.append(Role::Assistant, opening, Some(GREETING_PROVENANCE));

        info!(
            session_id = %session.id,
            patient_id = %session.record.patient.id,
            "conversation session started"
        );

        session
    }

    /// Submit a user utterance.
    ///
    /// Rejected as a silent no-op — transcript unchanged, `false` returned —
    /// when `text` is empty or whitespace-only, or when a previous
    /// submission's reply is still pending. On acceptance the user message
    /// is appended immediately and the assistant reply is scheduled for
    /// `now + delay`, to be delivered by a later [`poll_reply`] call.
    ///
    /// The returned bool acknowledges acceptance so the caller can clear
    /// its input buffer; it is not an error channel.
    ///
    /// [`poll_reply`]: ConversationSession::poll_reply
    pub fn submit(&mut self, text: &str, now: Instant) -> bool {
        if text.trim().is_empty() {
            debug!(session_id = %self.id, "ignoring empty submission");
            return false;
        }
        if self.pending.is_some() {
            debug!(session_id = %self.id, "ignoring submission while a reply is pending");
            return false;
        }

        let id = self.append(Role::User, text.to_string(), None);

        let wait = self.delay.sample();
        self.pending = Some(PendingReply {
            utterance: text.to_string(),
            due_at: now + wait,
        });

        debug!(
            session_id = %self.id,
            message_id = id.0,
            delay_ms = wait.as_millis() as u64,
            "user message accepted, reply scheduled"
        );

        true
    }

    /// Deliver the scheduled assistant reply if it has come due.
    ///
    /// Returns `true` when a reply was appended. Call this from the host
    /// event loop on every tick; before the due instant (or with nothing
    /// pending) it is a cheap no-op returning `false`.
    pub fn poll_reply(&mut self, now: Instant) -> bool {
        let due = self.pending.as_ref().is_some_and(|p| now >= p.due_at);
        if !due {
            return false;
        }
        let Some(pending) = self.pending.take() else {
            return false;
        };

        let reply = respond(&pending.utterance, &self.record);
        let id = self.append(Role::Assistant, reply, Some(ANALYSIS_PROVENANCE));

        info!(
            session_id = %self.id,
            message_id = id.0,
            "assistant reply delivered"
        );

        true
    }

    /// The full transcript, in append order.
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// True while a submitted utterance has not yet received its reply.
    ///
    /// Front-ends use this to disable input controls.
    pub fn awaiting_reply(&self) -> bool {
        self.pending.is_some()
    }

    /// The record this session answers from.
    pub fn record(&self) -> &PatientSummary {
        &self.record
    }

    /// This session's identifier.
    pub fn id(&self) -> SessionId {
        self.id
    }

    // ── Internal ──────────────────────────────────────────────────────────────

    /// Append one message, assigning the next monotonic id.
    fn append(&mut self, role: Role, content: String, provenance: Option<&str>) -> MessageId {
        let id = MessageId(self.next_id);
        self.next_id += 1;

        self.messages.push(ChatMessage {
            id,
            role,
            content,
            timestamp: Utc::now(),
            provenance: provenance.map(str::to_string),
        });

        id
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::{Duration, Instant};

    use medichat_record::PatientSummary;

    use super::{ConversationSession, ANALYSIS_PROVENANCE, GREETING_PROVENANCE};
    use crate::{delay::DelayPolicy, message::Role};

    /// A session whose replies come due immediately.
    fn instant_session() -> ConversationSession {
        ConversationSession::new(
            Arc::new(PatientSummary::demo()),
            DelayPolicy::fixed(Duration::ZERO),
        )
    }

    #[test]
    fn fresh_session_has_exactly_the_greeting() {
        let session = instant_session();
        let messages = session.messages();

        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].role, Role::Assistant);
        assert_eq!(messages[0].provenance.as_deref(), Some(GREETING_PROVENANCE));
        assert!(messages[0].content.contains(&session.record().patient.name));
        assert!(!session.awaiting_reply());
    }

    #[test]
    fn empty_and_whitespace_submissions_are_no_ops() {
        let mut session = instant_session();
        let now = Instant::now();

        assert!(!session.submit("", now));
        assert!(!session.submit("   ", now));
        assert!(!session.submit("\t\n", now));

        assert_eq!(session.messages().len(), 1);
        assert!(!session.awaiting_reply());
    }

    #[test]
    fn submission_while_awaiting_reply_is_a_no_op() {
        let mut session = ConversationSession::new(
            Arc::new(PatientSummary::demo()),
            DelayPolicy::fixed(Duration::from_secs(3600)),
        );
        let now = Instant::now();

        assert!(session.submit("What are my medications?", now));
        assert!(session.awaiting_reply());

        // No second user message while the first reply is pending.
        assert!(!session.submit("And my allergies?", now));
        assert_eq!(session.messages().len(), 2);
    }

    /// Full round trip: user message appears immediately, the reply only
    /// after the due instant, and the reply enumerates every allergy.
    #[test]
    fn round_trip_delivers_allergy_answer() {
        let delay = Duration::from_millis(50);
        let mut session = ConversationSession::new(
            Arc::new(PatientSummary::demo()),
            DelayPolicy::fixed(delay),
        );
        let t0 = Instant::now();

        assert!(session.submit("What are my allergies?", t0));
        assert_eq!(session.messages().len(), 2);
        assert_eq!(session.messages()[1].role, Role::User);
        assert_eq!(session.messages()[1].content, "What are my allergies?");
        assert_eq!(session.messages()[1].provenance, None);

        // Before the due instant nothing is delivered.
        assert!(!session.poll_reply(t0));
        assert_eq!(session.messages().len(), 2);
        assert!(session.awaiting_reply());

        // At the due instant the reply lands.
        assert!(session.poll_reply(t0 + delay));
        let messages = session.messages();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[2].role, Role::Assistant);
        assert_eq!(messages[2].provenance.as_deref(), Some(ANALYSIS_PROVENANCE));
        for allergy in &session.record().medical_history.allergies {
            assert!(messages[2].content.contains(&allergy.allergen));
            assert!(messages[2].content.contains(&allergy.reaction));
            assert!(messages[2].content.contains(&allergy.severity));
        }
        assert!(!session.awaiting_reply());
    }

    #[test]
    fn poll_without_pending_reply_is_a_no_op() {
        let mut session = instant_session();
        assert!(!session.poll_reply(Instant::now()));
        assert_eq!(session.messages().len(), 1);
    }

    /// After a reply is delivered the gate reopens for the next round trip.
    #[test]
    fn gate_reopens_after_delivery() {
        let mut session = instant_session();
        let now = Instant::now();

        assert!(session.submit("medications", now));
        assert!(session.poll_reply(now));
        assert!(session.submit("lab results", now));
        assert!(session.poll_reply(now));

        assert_eq!(session.messages().len(), 5);
    }

    /// Message ids are unique and strictly increasing in append order.
    #[test]
    fn message_ids_are_monotonic() {
        let mut session = instant_session();
        let now = Instant::now();
        session.submit("vitals", now);
        session.poll_reply(now);
        session.submit("visits", now);
        session.poll_reply(now);

        let ids: Vec<u64> = session.messages().iter().map(|m| m.id.0).collect();
        assert_eq!(ids, vec![0, 1, 2, 3, 4]);
    }

    /// The dispatcher sees the submitted text exactly as given, including
    /// surrounding whitespace (only fully-blank input is rejected).
    #[test]
    fn submitted_text_is_preserved_verbatim() {
        let mut session = instant_session();
        let now = Instant::now();
        session.submit("  what medication am I on?  ", now);
        assert_eq!(session.messages()[1].content, "  what medication am I on?  ");
    }
}
