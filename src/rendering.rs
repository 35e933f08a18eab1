//! Rendering subsystem.
//!
//! Turns active session records into the listing the user (or a peer
//! program) sees.
//!
//! Components:
//! - `fields`: per-field formatting. Total functions; lookups go through
//!   [`crate::lookup::NameSource`].
//! - `formatter`: layout selection, truncation, header and line emission.

pub mod fields;
pub mod formatter;

pub use formatter::Formatter;
