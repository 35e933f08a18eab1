use std::io::{BufRead, Read, Write};

use log::debug;

use crate::configuration::config::Config;
use crate::configuration::types::DisplayMode;
use crate::error_handling::types::ResponderError;
use crate::responder::profile::{delegate_query, serve_profile};

/// Upper bound on the query line read from the transport.
const QUERY_LINE_MAX: u64 = 128;

/// What the responder decided after consuming the query line.
#[derive(Debug, PartialEq, Eq)]
pub enum QueryOutcome {
    /// The query named an identifier and the response was fully served
    /// (local profile or external delegate).
    Served,
    /// The query was empty: the caller emits the directory listing.
    DirectoryListing,
}

/// The one-request-per-connection query responder.
///
/// Reads exactly one bounded line, parses the target identifier out of it,
/// then dispatches: local profile first, external delegate second, or the
/// directory listing when no identifier was given. A delegate spawn failure
/// is the only error surfaced to the peer.
pub struct QueryResponder<'a> {
    config: &'a Config,
    mode: &'a DisplayMode,
}

impl<'a> QueryResponder<'a> {
    pub fn new(config: &'a Config, mode: &'a DisplayMode) -> Self {
        Self { config, mode }
    }

    /// Serves one query from `input`, writing the response to `out`.
    pub fn respond(
        &self,
        input: &mut dyn BufRead,
        out: &mut dyn Write,
    ) -> Result<QueryOutcome, ResponderError> {
        let eol = self.mode.eol();
        let line = read_query_line(input);
        let target = parse_query(&line);
        debug!("Query target: {:?}", target);

        // A "header" profile opens every response; absence is silent.
        serve_profile(&self.config.profile_dir, "header", out, eol)?;

        if target.is_empty() {
            return Ok(QueryOutcome::DirectoryListing);
        }

        if serve_profile(&self.config.profile_dir, target, out, eol)? {
            return Ok(QueryOutcome::Served);
        }

        match delegate_query(&self.config.finger_program, target, out, eol) {
            Ok(()) => Ok(QueryOutcome::Served),
            Err(ResponderError::DelegateSpawn(e)) => {
                // The peer gets a short diagnostic; the exit code carries
                // the failure.
                let _ = write!(out, "finger: {}{}", e, eol);
                let _ = out.flush();
                Err(ResponderError::DelegateSpawn(e))
            }
            Err(e) => Err(e),
        }
    }
}

/// Reads at most one bounded line. EOF and transport errors both yield an
/// empty query, which the caller treats as a directory request.
fn read_query_line(input: &mut dyn BufRead) -> String {
    let mut buf = Vec::new();
    match input.take(QUERY_LINE_MAX).read_until(b'\n', &mut buf) {
        Ok(_) => String::from_utf8_lossy(&buf).into_owned(),
        Err(_) => String::new(),
    }
}

/// Extracts the target identifier from a query line.
///
/// Leading whitespace is skipped; a host-indirection marker (`/` plus one
/// character) is consumed and ignored — this responder serves a single host
/// and never relays. The identifier runs to the first line-ending character
/// and may be empty.
pub fn parse_query(line: &str) -> &str {
    let mut rest = line.trim_start_matches([' ', '\t']);

    if rest.starts_with('/') {
        let mut chars = rest.chars();
        chars.next();
        if chars.next().is_some() {
            rest = chars.as_str();
        }
    }

    let rest = rest.trim_start_matches([' ', '\t']);
    let end = rest.find(['\r', '\n']).unwrap_or(rest.len());
    &rest[..end]
}
