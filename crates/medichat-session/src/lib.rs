//! # medichat-session
//!
//! The conversation session for medichat: an append-only, in-memory
//! transcript with a single-outstanding-round-trip gate and an explicit
//! scheduled reply.
//!
//! ## Round trip
//!
//! ```rust,ignore
//! use std::time::Instant;
//!
//! let mut session = ConversationSession::new(record, DelayPolicy::default());
//! session.submit("What are my allergies?", Instant::now());
//! // ... later, from the event loop:
//! if session.poll_reply(Instant::now()) {
//!     // the assistant reply is now the last entry in session.messages()
//! }
//! ```
//!
//! All mutation happens on discrete calls from a single host loop; the
//! session holds no locks and spawns no threads.

pub mod config;
pub mod delay;
pub mod message;
pub mod session;

pub use config::{ConfigError, ConfigResult, SessionConfig};
pub use delay::DelayPolicy;
pub use message::{ChatMessage, MessageId, Role};
pub use session::{ConversationSession, SessionId, ANALYSIS_PROVENANCE, GREETING_PROVENANCE};
