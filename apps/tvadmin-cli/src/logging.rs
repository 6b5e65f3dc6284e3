//! tracing subscriber setup.
//!
//! Human-readable events go to stderr. With `--log-file`, every event is also
//! appended to the file as one JSON object per line.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::error::{CliError, CliResult};

/// Filter used when `RUST_LOG` is unset.
pub fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "debug"
    } else {
        "info"
    }
}

pub fn init_logging(verbose: bool, log_file: Option<&Path>) -> CliResult<()> {
    let filter = default_filter(verbose);
    let filter_layer = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(filter))
        .map_err(|e| CliError::Config(format!("invalid log filter: {e}")))?;

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    let file_layer = match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| CliError::Io(format!("cannot open log file {}: {e}", path.display())))?;
            Some(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_current_span(false)
                    .flatten_event(true)
                    .with_writer(Mutex::new(file)),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(file_layer)
        .with(console_layer)
        .with(filter_layer)
        .try_init()
        .map_err(|e| CliError::Config(format!("failed to initialise logging: {e}")))?;

    tracing::debug!(filter = %filter, log_file = ?log_file, "Logging initialized");
    Ok(())
}
