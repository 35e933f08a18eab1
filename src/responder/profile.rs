use std::fs;
use std::io::Write;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;
use std::process::{Command, Stdio};

use log::debug;

use crate::error_handling::types::ResponderError;
use crate::rendering::formatter::truncate;
use crate::responder::sanitizer::sanitize;

/// Longest identifier used to form a profile file name.
const PROFILE_KEY_MAX: usize = 32;

/// Serves the local profile for `key` from `profile_dir`, if one exists.
///
/// The key is sanitized and bounded before it touches the filesystem. An
/// executable profile is run (argument vector, no shell) and its standard
/// output relayed; a plain file is read as text. Either way every line is
/// re-terminated with `eol`.
///
/// Returns `Ok(false)` when no profile answered (missing, unreadable, or
/// failed to spawn) — a silent miss, never reported to the caller of the
/// responder. Write failures on `out` are real errors.
pub fn serve_profile(
    profile_dir: &Path,
    key: &str,
    out: &mut dyn Write,
    eol: &str,
) -> Result<bool, ResponderError> {
    let key = truncate(&sanitize(key), PROFILE_KEY_MAX);
    let path = profile_dir.join(&key);

    let meta = match fs::metadata(&path) {
        Ok(m) => m,
        Err(_) => {
            debug!("No profile for {:?}", key);
            return Ok(false);
        }
    };

    let text = if meta.permissions().mode() & 0o111 != 0 {
        debug!("Running profile program {}", path.display());
        match Command::new(&path)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .output()
        {
            Ok(output) => String::from_utf8_lossy(&output.stdout).into_owned(),
            Err(e) => {
                debug!("Profile program {} failed to run: {}", path.display(), e);
                return Ok(false);
            }
        }
    } else {
        debug!("Reading profile file {}", path.display());
        match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) => {
                debug!("Profile file {} unreadable: {}", path.display(), e);
                return Ok(false);
            }
        }
    };

    relay_lines(&text, out, eol)?;
    Ok(true)
}

/// Hands the query to the external system-level responder and relays its
/// output. Only the sanitized form of the query reaches the child, as a
/// single argument-vector element — no shell is involved.
pub fn delegate_query(
    finger_program: &Path,
    query: &str,
    out: &mut dyn Write,
    eol: &str,
) -> Result<(), ResponderError> {
    let arg = sanitize(query);
    debug!("Delegating query to {}", finger_program.display());

    let output = Command::new(finger_program)
        .arg(arg)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .output()
        .map_err(ResponderError::DelegateSpawn)?;

    relay_lines(&String::from_utf8_lossy(&output.stdout), out, eol)
}

/// Writes `text` line by line, translating any line ending to `eol`, and
/// flushes so a terminating caller cannot truncate the response.
fn relay_lines(text: &str, out: &mut dyn Write, eol: &str) -> Result<(), ResponderError> {
    for line in text.lines() {
        write!(out, "{}{}", line, eol)?;
    }
    out.flush()?;
    Ok(())
}
