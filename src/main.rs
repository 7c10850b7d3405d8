//! tiercache CLI entry point.

use std::io::Write;
use std::process::ExitCode;

use clap::Parser;
use tiercache::cli::{Cli, CommandDispatcher};
use tiercache::config::CacheConfig;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `--debug` flag sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is INFO
///
/// Logs go to stderr so stdout stays machine-readable.
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("tiercache=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("tiercache=info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    tracing::debug!("tiercache starting with args: {:?}", cli);

    let mut config = match CacheConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(1);
        }
    };
    if let Some(root) = &cli.root {
        config.root = root.clone();
    }

    let dispatcher = CommandDispatcher::new(config);
    let mut stdout = std::io::stdout().lock();

    let code = match dispatcher.dispatch(&cli, &mut stdout) {
        Ok(result) => result.exit_status(),
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    };

    let _ = stdout.flush();
    ExitCode::from(code)
}
