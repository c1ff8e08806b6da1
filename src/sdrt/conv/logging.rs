//! Diagnostics setup. Everything goes to stderr so the CSV table can be
//! written to stdout untouched.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry, fmt};

use crate::sdrt::conv::error::{Result, ToolError};

/// Maps the CLI verbosity to a default filter directive.
///
/// Warnings (skipped entries) stay visible unless the user asked for quiet.
pub fn default_directive(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        return "error";
    }
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Installs the global subscriber. `RUST_LOG` takes precedence over the
/// verbosity flags.
pub fn init_logging(verbose: u8, quiet: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose, quiet)));

    Registry::default()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .with(filter)
        .try_init()
        .map_err(|error| ToolError::Logging(error.to_string()))
}
