//! Query responder subsystem.
//!
//! Answers one finger-style query per invocation: a directory listing for an
//! empty query, a local per-user profile when one exists, or a delegation to
//! the system-level responder. Every line written in responder mode is CRLF
//! terminated, including lines relayed from child processes.
//!
//! Components:
//! - `sanitizer`: character whitelist applied to any externally influenced
//!   string before it reaches a process invocation.
//! - `profile`: local override files/programs and the external delegate.
//! - `query`: the one-line query parser and the dispatch state machine.

pub mod profile;
pub mod query;
pub mod sanitizer;

pub use query::{QueryOutcome, QueryResponder};
pub use sanitizer::sanitize;
