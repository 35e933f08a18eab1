use std::fs::File;
use std::io::{BufReader, ErrorKind, Read};
use std::path::Path;

use log::{debug, warn};

use crate::session_log::types::{RecordKind, SessionRecord, RECORD_LEN};

/// Sequential, read-only reader over the binary session log.
///
/// The store performs raw fixed-size reads in on-disk order and filters out
/// every record that is not a login before it reaches the caller. A read
/// returning fewer bytes than one full record ends the pass: the accounting
/// subsystem may be appending concurrently and a trailing partial write is
/// normal, not corruption.
#[derive(Debug)]
pub struct RecordStore {
    reader: BufReader<File>,
    records_seen: usize,
}

impl RecordStore {
    /// Opens the session log read-only.
    pub fn open(path: &Path) -> Result<Self, std::io::Error> {
        let file = File::open(path)?;
        debug!("Opened session log {}", path.display());
        Ok(Self {
            reader: BufReader::new(file),
            records_seen: 0,
        })
    }

    /// Returns the next active (login) record, or `None` at end of stream.
    ///
    /// Logout and other record types are invisible to callers. Short reads
    /// end the stream silently; any other read error ends it with a warning.
    pub fn next_active(&mut self) -> Option<SessionRecord> {
        loop {
            let mut buf = [0u8; RECORD_LEN];
            match self.reader.read_exact(&mut buf) {
                Ok(()) => {}
                Err(e) if e.kind() == ErrorKind::UnexpectedEof => {
                    debug!("End of session log after {} record(s)", self.records_seen);
                    return None;
                }
                Err(e) => {
                    warn!("Session log read failed: {}", e);
                    return None;
                }
            }

            self.records_seen += 1;
            let record = SessionRecord::from_bytes(&buf);
            if record.kind == RecordKind::Login {
                return Some(record);
            }
        }
    }
}

impl Iterator for RecordStore {
    type Item = SessionRecord;

    fn next(&mut self) -> Option<SessionRecord> {
        self.next_active()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session_log::types::sample_record;
    use std::fs;
    use tempfile::TempDir;

    fn write_log(dir: &TempDir, records: &[SessionRecord], trailing_garbage: &[u8]) -> std::path::PathBuf {
        let path = dir.path().join("session.log");
        let mut bytes = Vec::new();
        for rec in records {
            bytes.extend_from_slice(&rec.to_bytes());
        }
        bytes.extend_from_slice(trailing_garbage);
        fs::write(&path, bytes).unwrap();
        path
    }

    #[test]
    fn test_only_login_records_are_returned() {
        let dir = TempDir::new().unwrap();
        let path = write_log(
            &dir,
            &[
                sample_record("alice", RecordKind::Login),
                sample_record("bob", RecordKind::Logout),
                sample_record("carol", RecordKind::Idle),
                sample_record("dave", RecordKind::Login),
                sample_record("eve", RecordKind::Unknown(7)),
            ],
            &[],
        );

        let logins: Vec<String> = RecordStore::open(&path).unwrap().map(|r| r.login).collect();
        assert_eq!(logins, vec!["alice", "dave"]);
    }

    #[test]
    fn test_partial_trailing_record_ends_stream() {
        let dir = TempDir::new().unwrap();
        let path = write_log(
            &dir,
            &[sample_record("alice", RecordKind::Login)],
            &[0u8; RECORD_LEN / 2],
        );

        let mut store = RecordStore::open(&path).unwrap();
        assert_eq!(store.next_active().unwrap().login, "alice");
        assert!(store.next_active().is_none());
    }

    #[test]
    fn test_empty_log_yields_nothing() {
        let dir = TempDir::new().unwrap();
        let path = write_log(&dir, &[], &[]);
        assert!(RecordStore::open(&path).unwrap().next_active().is_none());
    }

    #[test]
    fn test_missing_log_is_open_error() {
        let dir = TempDir::new().unwrap();
        let err = RecordStore::open(&dir.path().join("nope.log")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }
}
