//! # medichat-dispatch
//!
//! The simulated-assistant response dispatcher: a pure function from
//! (user utterance, patient record) to response text.
//!
//! There is no model and no inference here. An utterance is classified
//! against six fixed keyword sets in priority order, first match wins, and
//! the matching slice of the record is formatted into a canned answer. An
//! utterance matching nothing gets the capability menu. The dispatcher
//! never fails and has no side effects; calling it twice with the same
//! utterance and an unchanged record yields identical strings.

pub mod respond;
pub mod topic;

pub use respond::{greeting, respond};
pub use topic::Topic;
