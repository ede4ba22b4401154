//! Log subscriber writing to the console and a durable log file.

use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing::{Level, Subscriber};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Builds a subscriber with two sinks: the console and `log_file`.
///
/// The log file is opened in append mode so successive runs accumulate.
/// Nothing is installed globally; use [`init`] for that, or scope the
/// returned subscriber with `tracing::subscriber::with_default`.
pub fn subscriber(log_file: &Path, verbose: bool) -> Result<impl Subscriber + Send + Sync> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
        .with_context(|| format!("Failed to open log file: {}", log_file.display()))?;

    let filter = if verbose {
        EnvFilter::new(Level::DEBUG.to_string())
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(Level::INFO.to_string()))
    };

    Ok(tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .with(fmt::layer().with_target(false).with_ansi(false).with_writer(Mutex::new(file))))
}

/// Builds the subscriber and installs it as the global default.
pub fn init(log_file: &Path, verbose: bool) -> Result<()> {
    subscriber(log_file, verbose)?.try_init().context("Failed to install log subscriber")
}
