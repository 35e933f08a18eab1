use std::ffi::{CStr, CString};
use std::net::Ipv4Addr;

use log::trace;

use crate::lookup::lookup_trait::NameSource;

/// Name source backed by the system user database and reverse DNS.
pub struct SystemLookup;

impl NameSource for SystemLookup {
    /// Looks the login up with `getpwnam_r` and returns the GECOS field up
    /// to its first comma.
    fn full_name(&self, login: &str) -> Option<String> {
        let c_login = CString::new(login).ok()?;
        let mut pwd: libc::passwd = unsafe { std::mem::zeroed() };
        let mut buf = [0i8; 1024];
        let mut result: *mut libc::passwd = std::ptr::null_mut();

        let rc = unsafe {
            libc::getpwnam_r(
                c_login.as_ptr(),
                &mut pwd,
                buf.as_mut_ptr() as *mut libc::c_char,
                buf.len(),
                &mut result,
            )
        };
        if rc != 0 || result.is_null() {
            trace!("No user database entry for {}", login);
            return None;
        }

        let gecos = unsafe { CStr::from_ptr(pwd.pw_gecos) }.to_string_lossy();
        let name = gecos.split(',').next().unwrap_or("").trim();
        if name.is_empty() {
            None
        } else {
            Some(name.to_string())
        }
    }

    /// Resolves the address with `getnameinfo`, falling back to the dotted
    /// numeric form when there is no PTR record.
    fn host_name(&self, addr: Ipv4Addr) -> String {
        let sa = libc::sockaddr_in {
            sin_family: libc::AF_INET as libc::sa_family_t,
            sin_port: 0,
            sin_addr: libc::in_addr {
                s_addr: u32::from(addr).to_be(),
            },
            sin_zero: [0; 8],
        };
        let mut host = [0 as libc::c_char; libc::NI_MAXHOST as usize];

        let rc = unsafe {
            libc::getnameinfo(
                &sa as *const libc::sockaddr_in as *const libc::sockaddr,
                std::mem::size_of::<libc::sockaddr_in>() as libc::socklen_t,
                host.as_mut_ptr(),
                host.len() as libc::socklen_t,
                std::ptr::null_mut(),
                0,
                libc::NI_NAMEREQD,
            )
        };
        if rc == 0 {
            let name = unsafe { CStr::from_ptr(host.as_ptr()) }
                .to_string_lossy()
                .into_owned();
            if !name.is_empty() {
                return name;
            }
        }
        trace!("No PTR record for {}, using numeric form", addr);
        addr.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_name_handles_unknown_login() {
        // A login that cannot exist: NUL would be rejected, this one just
        // has no entry.
        assert_eq!(SystemLookup.full_name("no-such-user-naswho"), None);
    }

    #[test]
    fn test_full_name_rejects_embedded_nul() {
        assert_eq!(SystemLookup.full_name("ro\0ot"), None);
    }

    #[test]
    fn test_host_name_always_returns_something() {
        // Resolution result depends on the host; the numeric fallback makes
        // the call total either way.
        let name = SystemLookup.host_name(Ipv4Addr::new(127, 0, 0, 1));
        assert!(!name.is_empty());
    }
}
