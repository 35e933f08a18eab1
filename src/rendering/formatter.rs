use std::io::Write;

use log::debug;

use crate::configuration::types::DisplayMode;
use crate::lookup::lookup_trait::NameSource;
use crate::rendering::fields;
use crate::session_log::types::SessionRecord;

const HDR_FULL: &str = "Login      Name              What  TTY  When      From      Location";
const HDR_COMPACT: &str = "Login      Port    What      When          From       Location";

/// Marker printed before the port number.
const PORT_MARKER: &str = "S";
/// Replaces the port marker when the true port exceeds the layout ceiling.
const OVERFLOW_MARKER: &str = ">";

/// Renders session records into one of the fixed column layouts.
///
/// The layout is chosen once from the display mode: full-identity vs
/// compact, and within each, padded human columns vs the comma-delimited
/// raw form. Raw output carries no header and no truncation.
pub struct Formatter<'a> {
    mode: &'a DisplayMode,
    names: &'a dyn NameSource,
}

impl<'a> Formatter<'a> {
    pub fn new(mode: &'a DisplayMode, names: &'a dyn NameSource) -> Self {
        Self { mode, names }
    }

    /// The header line for the active layout, or `None` when the mode does
    /// not get one (raw output and responder directory listings).
    pub fn header(&self) -> Option<&'static str> {
        if self.mode.raw || self.mode.responder {
            None
        } else if self.mode.full_identity {
            Some(HDR_FULL)
        } else {
            Some(HDR_COMPACT)
        }
    }

    /// Port marker and number as printed: above the layout ceiling the
    /// ceiling is substituted and the marker switches to the overflow
    /// marker. Raw output always carries the true number.
    fn effective_port(&self, nas_port: u32) -> (&'static str, u32) {
        let ceiling = self.mode.port_ceiling();
        if !self.mode.raw && nas_port > ceiling {
            (OVERFLOW_MARKER, ceiling)
        } else {
            (PORT_MARKER, nas_port)
        }
    }

    /// Renders one record into a line, without terminator.
    pub fn line(&self, record: &SessionRecord) -> String {
        let (marker, port) = self.effective_port(record.nas_port);
        let what = fields::proto_label(record.proto, record.port_type, self.mode.protocol_detail);
        let when = fields::format_time(record.timestamp, self.mode.full_identity);
        let from = fields::resolve_address(record.nas_address, self.names);
        let location = fields::resolve_address(record.framed_address, self.names);

        if self.mode.full_identity {
            let identity = fields::identity_column(record, self.mode, self.names);
            if self.mode.raw {
                format!(
                    "{},{},{},{}{},{},{},{}",
                    record.login, identity, what, marker, port, when, from, location
                )
            } else {
                format!(
                    "{:<10} {:<17} {:<5} {}{:<3} {:<9} {:<9} {}",
                    truncate(&record.login, 10),
                    truncate(&identity, 17),
                    truncate(&what, 5),
                    marker,
                    port,
                    truncate(&when, 9),
                    truncate(&from, 9),
                    truncate(&location, 16),
                )
            }
        } else if self.mode.raw {
            format!(
                "{},{}{},{},{},{},{}",
                record.login, marker, port, what, when, from, location
            )
        } else {
            format!(
                "{:<10} {}{:<5}  {:<6} {:<13} {:<10} {}",
                truncate(&record.login, 10),
                marker,
                port,
                truncate(&what, 6),
                truncate(&when, 13),
                truncate(&from, 10),
                truncate(&location, 16),
            )
        }
    }

    /// Streams the header (when the layout has one) and one line per record
    /// to `out`, each terminated with the mode's terminator, and flushes.
    pub fn write_listing(
        &self,
        records: impl Iterator<Item = SessionRecord>,
        out: &mut dyn Write,
    ) -> std::io::Result<()> {
        let eol = self.mode.eol();

        if let Some(header) = self.header() {
            write!(out, "{}{}", header, eol)?;
        }

        let mut count = 0usize;
        for record in records {
            write!(out, "{}{}", self.line(&record), eol)?;
            count += 1;
        }
        out.flush()?;

        debug!("Rendered {} active session(s)", count);
        Ok(())
    }
}

/// Hard cut at `max` characters. No ellipsis.
pub fn truncate(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lookup::test_support::FixedNames;
    use crate::session_log::types::{sample_record, RecordKind};

    fn mode(full_identity: bool, raw: bool) -> DisplayMode {
        DisplayMode {
            full_identity,
            protocol_detail: false,
            session_id: false,
            caller_id: false,
            raw,
            responder: false,
        }
    }

    #[test]
    fn test_full_identity_row_layout() {
        let rec = sample_record("carol", RecordKind::Login);
        let m = mode(true, false);
        let f = Formatter::new(&m, &FixedNames);

        let when = fields::format_time(rec.timestamp, true);
        let expected = format!("carol      Carol Jones       PPP   S12  {} nas1      ", when);
        assert_eq!(f.line(&rec), expected);
    }

    #[test]
    fn test_compact_row_layout() {
        let rec = sample_record("carol", RecordKind::Login);
        let m = mode(false, false);
        let f = Formatter::new(&m, &FixedNames);

        let when = fields::format_time(rec.timestamp, false);
        let expected = format!("carol      S12     PPP    {}  nas1       ", when);
        assert_eq!(f.line(&rec), expected);
    }

    #[test]
    fn test_login_truncated_to_ten_characters() {
        let mut rec = sample_record("verylonglogin15", RecordKind::Login);
        rec.login = "abcdefghijklmno".to_string();
        let m = mode(true, false);
        let f = Formatter::new(&m, &FixedNames);

        let line = f.line(&rec);
        // Login column is a hard 10-character cut (the identity column
        // still carries the fallback login in full).
        assert_eq!(&line[..11], "abcdefghij ");
    }

    #[test]
    fn test_port_overflow_substitution() {
        let mut rec = sample_record("carol", RecordKind::Login);
        rec.nas_port = 1500;

        let m = mode(true, false);
        let f = Formatter::new(&m, &FixedNames);
        assert!(f.line(&rec).contains(">999"));

        // Compact ceiling is higher; 1500 fits.
        let m = mode(false, false);
        let f = Formatter::new(&m, &FixedNames);
        assert!(f.line(&rec).contains("S1500"));
    }

    #[test]
    fn test_raw_output_preserves_true_port() {
        let mut rec = sample_record("carol", RecordKind::Login);
        rec.nas_port = 1500;
        let m = mode(true, true);
        let f = Formatter::new(&m, &FixedNames);

        let when = fields::format_time(rec.timestamp, true);
        let expected = format!("carol,Carol Jones,PPP,S1500,{},nas1,", when);
        assert_eq!(f.line(&rec), expected);
    }

    #[test]
    fn test_raw_compact_field_order() {
        let rec = sample_record("dave", RecordKind::Login);
        let m = mode(false, true);
        let f = Formatter::new(&m, &FixedNames);

        let when = fields::format_time(rec.timestamp, false);
        let expected = format!("dave,S12,PPP,{},nas1,", when);
        assert_eq!(f.line(&rec), expected);
    }

    #[test]
    fn test_header_selection() {
        let m = mode(true, false);
        assert_eq!(Formatter::new(&m, &FixedNames).header(), Some(HDR_FULL));

        let m = mode(false, false);
        assert_eq!(Formatter::new(&m, &FixedNames).header(), Some(HDR_COMPACT));

        let m = mode(true, true);
        assert_eq!(Formatter::new(&m, &FixedNames).header(), None);

        let mut m = mode(false, false);
        m.responder = true;
        assert_eq!(Formatter::new(&m, &FixedNames).header(), None);
    }

    #[test]
    fn test_write_listing_emits_header_then_rows() {
        let m = mode(true, false);
        let f = Formatter::new(&m, &FixedNames);
        let records = vec![sample_record("carol", RecordKind::Login)];

        let mut out = Vec::new();
        f.write_listing(records.into_iter(), &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.split('\n').collect();
        assert_eq!(lines.len(), 3); // header, row, trailing empty
        assert_eq!(lines[0], HDR_FULL);
        assert!(lines[1].starts_with("carol"));
        assert_eq!(lines[2], "");
    }

    #[test]
    fn test_truncate_is_a_hard_cut() {
        assert_eq!(truncate("abcdef", 4), "abcd");
        assert_eq!(truncate("ab", 4), "ab");
        assert_eq!(truncate("", 4), "");
    }
}
