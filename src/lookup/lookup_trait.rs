use std::net::Ipv4Addr;

/// Interface to the system identity and hostname databases.
///
/// Both lookups are total: they degrade to a fallback value instead of
/// failing, so rendering never has to handle lookup errors.
pub trait NameSource {
    /// Display name for a login, or `None` when the system has no entry
    /// (or an empty one) for it.
    fn full_name(&self, login: &str) -> Option<String>;

    /// Hostname for an address. Implementations fall back to the numeric
    /// form when the address does not resolve; callers are expected to have
    /// filtered sentinel addresses beforehand.
    fn host_name(&self, addr: Ipv4Addr) -> String;
}
