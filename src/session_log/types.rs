use std::net::Ipv4Addr;

/// Width of the login field on disk.
pub const LOGIN_LEN: usize = 32;
/// Width of the session id field on disk. Not necessarily NUL-terminated.
pub const SESSION_ID_LEN: usize = 16;
/// Width of the caller id field on disk.
pub const CALLER_ID_LEN: usize = 16;
/// Total size of one on-disk record.
pub const RECORD_LEN: usize = 88;

/// Kind of a logged connection event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Idle,
    Login,
    Logout,
    Unknown(u8),
}

impl RecordKind {
    pub fn from_byte(b: u8) -> Self {
        match b {
            0 => RecordKind::Idle,
            1 => RecordKind::Login,
            2 => RecordKind::Logout,
            other => RecordKind::Unknown(other),
        }
    }
}

/// One decoded session record.
///
/// Fixed 88-byte layout, in on-disk order: login (32), session id (16),
/// caller id (16), record type (1), protocol char (1), port type (1),
/// padding (1), NAS port (u32 LE), NAS address (4 octets, network order),
/// framed address (4 octets, network order), timestamp (u64 LE, seconds).
#[derive(Debug, Clone, PartialEq)]
pub struct SessionRecord {
    pub login: String,
    pub session_id: String,
    pub caller_id: String,
    pub kind: RecordKind,
    pub proto: u8,
    pub port_type: u8,
    pub nas_port: u32,
    pub nas_address: Ipv4Addr,
    pub framed_address: Ipv4Addr,
    pub timestamp: u64,
}

impl SessionRecord {
    pub fn from_bytes(buf: &[u8; RECORD_LEN]) -> Self {
        let login = fixed_field(&buf[0..LOGIN_LEN]);
        let session_id = fixed_field(&buf[32..32 + SESSION_ID_LEN]);
        let caller_id = fixed_field(&buf[48..48 + CALLER_ID_LEN]);

        let kind = RecordKind::from_byte(buf[64]);
        let proto = buf[65];
        let port_type = buf[66];

        let nas_port = u32::from_le_bytes([buf[68], buf[69], buf[70], buf[71]]);
        let nas_address = Ipv4Addr::new(buf[72], buf[73], buf[74], buf[75]);
        let framed_address = Ipv4Addr::new(buf[76], buf[77], buf[78], buf[79]);
        let timestamp = u64::from_le_bytes([
            buf[80], buf[81], buf[82], buf[83], buf[84], buf[85], buf[86], buf[87],
        ]);

        Self {
            login,
            session_id,
            caller_id,
            kind,
            proto,
            port_type,
            nas_port,
            nas_address,
            framed_address,
            timestamp,
        }
    }

    /// Encodes a record into its on-disk form. Test fixture helper; the
    /// reader side never writes the log.
    #[cfg(test)]
    pub fn to_bytes(&self) -> [u8; RECORD_LEN] {
        let mut buf = [0u8; RECORD_LEN];
        buf[0..self.login.len().min(LOGIN_LEN)]
            .copy_from_slice(&self.login.as_bytes()[..self.login.len().min(LOGIN_LEN)]);
        buf[32..32 + self.session_id.len().min(SESSION_ID_LEN)].copy_from_slice(
            &self.session_id.as_bytes()[..self.session_id.len().min(SESSION_ID_LEN)],
        );
        buf[48..48 + self.caller_id.len().min(CALLER_ID_LEN)].copy_from_slice(
            &self.caller_id.as_bytes()[..self.caller_id.len().min(CALLER_ID_LEN)],
        );
        buf[64] = match self.kind {
            RecordKind::Idle => 0,
            RecordKind::Login => 1,
            RecordKind::Logout => 2,
            RecordKind::Unknown(b) => b,
        };
        buf[65] = self.proto;
        buf[66] = self.port_type;
        buf[68..72].copy_from_slice(&self.nas_port.to_le_bytes());
        buf[72..76].copy_from_slice(&self.nas_address.octets());
        buf[76..80].copy_from_slice(&self.framed_address.octets());
        buf[80..88].copy_from_slice(&self.timestamp.to_le_bytes());
        buf
    }
}

/// True for the sentinel addresses that mean "unknown" in the log.
/// Sentinels render as empty and are never handed to name resolution.
pub fn is_unknown_address(addr: Ipv4Addr) -> bool {
    matches!(u32::from(addr), 0 | u32::MAX | 0xFFFF_FFFE)
}

/// Decodes a bounded on-disk field: the bytes up to the first NUL, or the
/// whole field when no NUL is present.
fn fixed_field(raw: &[u8]) -> String {
    let end = raw.iter().position(|&b| b == 0).unwrap_or(raw.len());
    String::from_utf8_lossy(&raw[..end]).into_owned()
}

/// Record fixture shared by tests across the crate.
#[cfg(test)]
pub fn sample_record(login: &str, kind: RecordKind) -> SessionRecord {
    SessionRecord {
        login: login.to_string(),
        session_id: "0000012B".to_string(),
        caller_id: String::new(),
        kind,
        proto: b'P',
        port_type: b'A',
        nas_port: 12,
        nas_address: Ipv4Addr::new(192, 0, 2, 1),
        framed_address: Ipv4Addr::new(0, 0, 0, 0),
        timestamp: 1_700_000_000,
    }
}
