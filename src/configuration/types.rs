/// Display flags, derived once from the command line before any rendering.
///
/// The mode is immutable for the lifetime of one invocation and is read by
/// every rendering component; no component consults ambient global state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayMode {
    /// Full-identity layout (name column) instead of the compact port layout.
    pub full_identity: bool,
    /// Verbose protocol labels including the port type character.
    pub protocol_detail: bool,
    /// Show the caller id in the identity column. Takes precedence over
    /// `session_id`.
    pub session_id: bool,
    /// Show the session id in the identity column instead of the display name.
    pub caller_id: bool,
    /// Comma-delimited machine output: no header, no truncation, true port
    /// numbers.
    pub raw: bool,
    /// Query-responder mode: CRLF terminators, compact layout by default,
    /// no header above the directory listing.
    pub responder: bool,
}

impl DisplayMode {
    /// Resolves the effective mode from the raw command-line flags.
    ///
    /// `--caller-id` and `--full-name` force the full-identity layout;
    /// otherwise `--no-full-name` or responder mode force the compact one.
    /// Full identity is the default.
    pub fn resolve(
        full_name: bool,
        no_full_name: bool,
        caller_id: bool,
        session_id: bool,
        protocol_detail: bool,
        raw: bool,
        responder: bool,
    ) -> Self {
        let full_identity = if caller_id || full_name {
            true
        } else {
            !(no_full_name || responder)
        };

        Self {
            full_identity,
            protocol_detail,
            session_id,
            caller_id,
            raw,
            responder,
        }
    }

    /// Line terminator appended to every emitted line, header included.
    pub fn eol(&self) -> &'static str {
        if self.responder {
            "\r\n"
        } else {
            "\n"
        }
    }

    /// Largest port number printable in the active layout. Ports above it
    /// render as the ceiling with the overflow marker (non-raw output only).
    pub fn port_ceiling(&self) -> u32 {
        if self.full_identity {
            999
        } else {
            99999
        }
    }
}
