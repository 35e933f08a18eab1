use std::io::{BufRead, Write};

use log::warn;

use crate::configuration::config::Config;
use crate::configuration::types::DisplayMode;
use crate::error_handling::types::AppError;
use crate::lookup::lookup_trait::NameSource;
use crate::rendering::formatter::Formatter;
use crate::responder::query::{QueryOutcome, QueryResponder};
use crate::session_log::reader::RecordStore;

/// Protocol characters still listed when shell sessions are hidden.
const NON_SHELL_PROTOS: &[u8] = b"PCS";

/// Wires one invocation together: the optional query responder, the session
/// log pass, and the rendering pipeline.
pub struct Controller<'a> {
    config: Config,
    mode: DisplayMode,
    hide_shell: bool,
    names: &'a dyn NameSource,
}

impl<'a> Controller<'a> {
    pub fn new(
        config: Config,
        mode: DisplayMode,
        hide_shell: bool,
        names: &'a dyn NameSource,
    ) -> Self {
        Self {
            config,
            mode,
            hide_shell,
            names,
        }
    }

    /// Runs one invocation.
    ///
    /// In responder mode one query line is read from `input` first; a query
    /// that names an identifier is fully served there and the log is never
    /// touched. Otherwise the active sessions are listed to `out`.
    pub fn run(&self, input: &mut dyn BufRead, out: &mut dyn Write) -> Result<(), AppError> {
        if self.mode.responder {
            let responder = QueryResponder::new(&self.config, &self.mode);
            match responder.respond(input, out)? {
                QueryOutcome::Served => return Ok(()),
                QueryOutcome::DirectoryListing => {}
            }
        }

        self.list_sessions(out)
    }

    fn list_sessions(&self, out: &mut dyn Write) -> Result<(), AppError> {
        let store = match RecordStore::open(&self.config.session_log) {
            Ok(store) => store,
            Err(e) => {
                // An unreadable log means no rows, not a failed invocation.
                warn!(
                    "Error reading {}: {}",
                    self.config.session_log.display(),
                    e
                );
                return Ok(());
            }
        };

        let hide_shell = self.hide_shell;
        let records = store.filter(move |r| !hide_shell || NON_SHELL_PROTOS.contains(&r.proto));

        let formatter = Formatter::new(&self.mode, self.names);
        formatter.write_listing(records, out)?;
        Ok(())
    }
}
