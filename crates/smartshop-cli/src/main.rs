//! SmartShop CLI - sign in, register and view your profile from a terminal.
//!
//! Usage:
//!   smartshop login [email]
//!   smartshop register
//!   smartshop me
//!   smartshop status

mod app;

use std::io;

use anyhow::Result;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use app::App;

/// Log file name prefix when file logging is enabled
const LOG_FILE_PREFIX: &str = "smartshop.log";

const USAGE: &str = "\
Usage: smartshop <command>

Commands:
  login [email]   Sign in and store the session token
  register        Create a new account
  me              Show the signed-in user's profile
  status          Show whether a session token is stored
";

/// Initialize the tracing subscriber for logging.
///
/// Use RUST_LOG to control the level (e.g., RUST_LOG=debug). When
/// SMARTSHOP_LOG_DIR is set, logs are also written to a daily file there.
fn init_tracing() -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let (file_layer, guard) = match std::env::var("SMARTSHOP_LOG_DIR") {
        Ok(dir) if !dir.trim().is_empty() => {
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (
                Some(fmt::layer().with_ansi(false).with_writer(writer)),
                Some(guard),
            )
        }
        _ => (None, None),
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(file_layer)
        .with(filter)
        .init();

    guard
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let _log_guard = init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(command) = args.first() else {
        eprint!("{}", USAGE);
        return Ok(());
    };

    info!(%command, "SmartShop CLI starting");
    let mut app = App::new()?;

    match command.as_str() {
        "login" => app.login(args.get(1).cloned()).await,
        "register" => app.register().await,
        "me" => app.show_profile().await,
        "status" => {
            app.show_status();
            Ok(())
        }
        "-h" | "--help" | "help" => {
            print!("{}", USAGE);
            Ok(())
        }
        other => {
            eprint!("{}", USAGE);
            Err(anyhow::anyhow!("Unknown command: {}", other))
        }
    }
}
