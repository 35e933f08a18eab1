//! System identity and hostname lookups.
//!
//! Rendering never talks to the system databases directly; it goes through
//! the [`NameSource`] trait so tests can substitute a deterministic source.
//!
//! - `lookup_trait`: the NameSource trait defining the lookup API.
//! - `system_lookup`: the libc-backed implementation (user database and
//!   reverse DNS).

pub mod lookup_trait;
pub mod system_lookup;

pub use lookup_trait::NameSource;
pub use system_lookup::SystemLookup;
