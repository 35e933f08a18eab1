use clap::Parser;
use log::error;
use naswho::configuration::config::Config;
use naswho::configuration::types::DisplayMode;
use naswho::controller::controller_handler::Controller;
use naswho::error_handling::types::{AppError, ResponderError};
use naswho::lookup::system_lookup::SystemLookup;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "naswho")]
#[command(version)]
#[command(about = "Show who is logged in on the terminal servers")]
struct Args {
    /// Alternate configuration directory
    #[arg(short = 'd', long, env = "NASWHO_CONFIG_DIR", default_value = "/etc/naswho")]
    config_dir: PathBuf,

    /// Behave as a finger responder: read one query line, answer with CRLF
    #[arg(short = 'f', long)]
    fingerd: bool,

    /// Hide shell sessions from the listing
    #[arg(short = 'S', long)]
    hide_shell: bool,

    /// Show the session id instead of the display name
    #[arg(short = 'i', long)]
    session_id: bool,

    /// Force the full-identity layout
    #[arg(short = 's', long)]
    full_name: bool,

    /// Force the compact layout
    #[arg(short = 'n', long)]
    no_full_name: bool,

    /// Show the port type next to the protocol
    #[arg(short = 'p', long)]
    port_type: bool,

    /// Show the caller id, if available (implies the full-identity layout)
    #[arg(short = 'c', long)]
    caller_id: bool,

    /// Raw comma-delimited output
    #[arg(short = 'r', long)]
    raw: bool,
}

/// Installed under a name containing "fingerd" (typically a symlink), the
/// program switches to responder mode without any flag.
fn invoked_as_fingerd() -> bool {
    std::env::args()
        .next()
        .map(|argv0| argv0.contains("fingerd"))
        .unwrap_or(false)
}

fn main() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .format_target(false)
        .init();

    let args = Args::parse();
    let responder = args.fingerd || invoked_as_fingerd();

    let config = match Config::from_dir(&args.config_dir) {
        Ok(config) => config,
        Err(e) => {
            error!("Unable to import configuration: {}", e);
            std::process::exit(1);
        }
    };

    let mode = DisplayMode::resolve(
        args.full_name,
        args.no_full_name,
        args.caller_id,
        args.session_id,
        args.port_type,
        args.raw,
        responder,
    );

    let names = SystemLookup;
    let controller = Controller::new(config, mode, args.hide_shell, &names);

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let result = controller.run(&mut stdin.lock(), &mut stdout.lock());

    match result {
        Ok(()) => {}
        Err(AppError::ResponderError(ResponderError::DelegateSpawn(_))) => {
            // The diagnostic already went to the output stream.
            std::process::exit(1);
        }
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn args_under_test(argv: &[&str]) -> Result<Args, clap::Error> {
        Args::try_parse_from(argv)
    }

    #[test]
    #[serial]
    fn test_default_config_dir() {
        std::env::remove_var("NASWHO_CONFIG_DIR");
        let args = args_under_test(&["naswho"]).unwrap();
        assert_eq!(args.config_dir, PathBuf::from("/etc/naswho"));
        assert!(!args.fingerd);
        assert!(!args.raw);
    }

    #[test]
    #[serial]
    fn test_env_overrides_config_dir() {
        std::env::set_var("NASWHO_CONFIG_DIR", "/tmp/naswho-test");
        let args = args_under_test(&["naswho"]).unwrap();
        assert_eq!(args.config_dir, PathBuf::from("/tmp/naswho-test"));
        std::env::remove_var("NASWHO_CONFIG_DIR");
    }

    #[test]
    #[serial]
    fn test_flag_parsing() {
        std::env::remove_var("NASWHO_CONFIG_DIR");
        let args = args_under_test(&["naswho", "-f", "-S", "-c", "-r"]).unwrap();
        assert!(args.fingerd);
        assert!(args.hide_shell);
        assert!(args.caller_id);
        assert!(args.raw);

        let mode = DisplayMode::resolve(
            args.full_name,
            args.no_full_name,
            args.caller_id,
            args.session_id,
            args.port_type,
            args.raw,
            args.fingerd,
        );
        // Caller id wins over the responder's compact default.
        assert!(mode.full_identity);
        assert_eq!(mode.eol(), "\r\n");
    }
}
