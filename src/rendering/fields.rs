use std::net::Ipv4Addr;

use chrono::{Local, TimeZone};

use crate::configuration::types::DisplayMode;
use crate::lookup::lookup_trait::NameSource;
use crate::session_log::types::{is_unknown_address, SessionRecord};

/// Port type characters with a defined meaning; anything else displays blank.
const KNOWN_PORT_TYPES: &[u8] = b"ASITX";

/// Label for the What column.
///
/// Plain form: `SLIP`, `PPP` or `shell`. Detailed form: a 3-letter protocol
/// tag plus the port type character, blanked when the type is not known.
pub fn proto_label(proto: u8, port_type: u8, detailed: bool) -> String {
    if detailed {
        let tag = match proto {
            b'S' => "SLP",
            b'P' => "PPP",
            _ => "shl",
        };
        let pt = if KNOWN_PORT_TYPES.contains(&port_type) {
            port_type as char
        } else {
            ' '
        };
        format!("{} {}", tag, pt)
    } else {
        match proto {
            b'S' => "SLIP",
            b'P' => "PPP",
            _ => "shell",
        }
        .to_string()
    }
}

/// Session start time in local time.
///
/// `short` is the full-identity form `day hh:mm`; the compact layout gets
/// the wider `day dd hh:mm`. A timestamp outside the representable range
/// renders as `?`.
pub fn format_time(timestamp: u64, short: bool) -> String {
    match Local.timestamp_opt(timestamp as i64, 0).single() {
        Some(t) => {
            if short {
                t.format("%a %H:%M").to_string()
            } else {
                // %e keeps the day space-padded, like the column always was
                t.format("%a %e %H:%M").to_string()
            }
        }
        None => "?".to_string(),
    }
}

/// Shortens a terminal device path to its column form.
///
/// Three naming families are recognized: numbered legacy terminals
/// (`/dev/tty2` -> `v2`), prefixed terminals (`/dev/ttyS0` -> `S0`,
/// `/dev/vc3` -> `v3`) and dial-out devices (`/dev/cua1` -> `a1`).
/// Anything else renders as `??`.
pub fn shorten_port(raw: &str) -> String {
    let tty = raw.strip_prefix("/dev/").unwrap_or(raw);

    if let Some(rest) = tty.strip_prefix("tty") {
        if rest.starts_with(|c: char| c.is_ascii_digit()) {
            return format!("v{}", rest);
        }
        return rest.to_string();
    }
    if let Some(rest) = tty.strip_prefix("vc") {
        return format!("v{}", rest);
    }
    if let Some(rest) = tty.strip_prefix("cu") {
        return rest.to_string();
    }
    "??".to_string()
}

/// Hostname for an address, empty for the sentinel "unknown" values.
/// Sentinels are never handed to the resolver.
pub fn resolve_address(addr: Ipv4Addr, names: &dyn NameSource) -> String {
    if is_unknown_address(addr) {
        String::new()
    } else {
        names.host_name(addr)
    }
}

/// Value of the identity column: caller id, session id, or the display name
/// with the raw login as fallback. Caller id is checked first.
pub fn identity_column(
    record: &SessionRecord,
    mode: &DisplayMode,
    names: &dyn NameSource,
) -> String {
    if mode.caller_id {
        record.caller_id.clone()
    } else if mode.session_id {
        record.session_id.clone()
    } else {
        names
            .full_name(&record.login)
            .unwrap_or_else(|| record.login.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lookup::test_support::FixedNames;
    use crate::session_log::types::{sample_record, RecordKind};

    #[test]
    fn test_proto_label_plain() {
        assert_eq!(proto_label(b'S', b'A', false), "SLIP");
        assert_eq!(proto_label(b'P', b'A', false), "PPP");
        assert_eq!(proto_label(b'X', b'A', false), "shell");
    }

    #[test]
    fn test_proto_label_detailed_normalizes_port_type() {
        assert_eq!(proto_label(b'S', b'A', true), "SLP A");
        assert_eq!(proto_label(b'P', b'X', true), "PPP X");
        assert_eq!(proto_label(b'z', b'T', true), "shl T");
        // 'q' is not a known port type
        assert_eq!(proto_label(b'P', b'q', true), "PPP  ");
    }

    #[test]
    fn test_format_time_widths() {
        let short = format_time(1_700_000_000, true);
        let wide = format_time(1_700_000_000, false);
        // `day hh:mm` and `day dd hh:mm`, regardless of the local timezone
        assert_eq!(short.len(), 9);
        assert_eq!(wide.len(), 12);
        assert_eq!(&wide[..4], &short[..4]);
    }

    #[test]
    fn test_format_time_out_of_range() {
        assert_eq!(format_time(i64::MAX as u64, true), "?");
    }

    #[test]
    fn test_shorten_port_families() {
        assert_eq!(shorten_port("/dev/tty2"), "v2");
        assert_eq!(shorten_port("/dev/ttyS0"), "S0");
        assert_eq!(shorten_port("/dev/vc3"), "v3");
        assert_eq!(shorten_port("/dev/cua1"), "a1");
        assert_eq!(shorten_port("ttyUSB0"), "USB0");
        assert_eq!(shorten_port("/dev/null"), "??");
        assert_eq!(shorten_port("console"), "??");
    }

    #[test]
    fn test_resolve_address_sentinels_skip_resolution() {
        // FixedNames panics on sentinel input, so these assert both the
        // empty rendering and that no resolution was attempted.
        for addr in [
            Ipv4Addr::new(0, 0, 0, 0),
            Ipv4Addr::new(255, 255, 255, 255),
            Ipv4Addr::new(255, 255, 255, 254),
        ] {
            assert_eq!(resolve_address(addr, &FixedNames), "");
        }
        assert_eq!(resolve_address(Ipv4Addr::new(192, 0, 2, 1), &FixedNames), "nas1");
    }

    fn mode_with(caller_id: bool, session_id: bool) -> crate::configuration::types::DisplayMode {
        crate::configuration::types::DisplayMode {
            full_identity: true,
            protocol_detail: false,
            session_id,
            caller_id,
            raw: false,
            responder: false,
        }
    }

    #[test]
    fn test_identity_column_caller_id_takes_precedence() {
        let mut rec = sample_record("alice", RecordKind::Login);
        rec.caller_id = "5551234".to_string();
        assert_eq!(identity_column(&rec, &mode_with(true, true), &FixedNames), "5551234");
        assert_eq!(identity_column(&rec, &mode_with(false, true), &FixedNames), "0000012B");
        assert_eq!(
            identity_column(&rec, &mode_with(false, false), &FixedNames),
            "Alice Cooper"
        );
    }

    #[test]
    fn test_identity_column_falls_back_to_login() {
        let rec = sample_record("mallory", RecordKind::Login);
        assert_eq!(identity_column(&rec, &mode_with(false, false), &FixedNames), "mallory");
    }
}
