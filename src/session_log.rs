//! Session log subsystem.
//!
//! This module reads the fixed-format binary log written by the accounting
//! subsystem and yields the records that represent currently active sessions.
//!
//! Components:
//! - `types`: the on-disk record layout and its decoded form.
//! - `reader`: the sequential, read-only log reader.

pub mod reader;
pub mod types;

pub use reader::RecordStore;
pub use types::{RecordKind, SessionRecord};
