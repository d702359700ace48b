//! Logging initialization: logs go to `LOG_FILE` or are dropped, never to the console.
//!
//! stdout carries only `AI: ...` replies; `--verbose` node tracing goes to stderr
//! through the node middleware, not through this subscriber.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

/// Installs the global subscriber.
///
/// - **RUST_LOG**: filter, e.g. `info` or `switchyard=debug`. Default: `info`.
/// - **LOG_FILE**: when set, logs are appended there as plain text (no ANSI).
///   When unset, logs are dropped.
pub fn init() -> Result<(), std::io::Error> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    match std::env::var("LOG_FILE") {
        Ok(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)?;
            let file_layer = tracing_subscriber::fmt::layer()
                .with_writer(std::sync::Mutex::new(file))
                .with_ansi(false)
                .with_filter(filter);
            tracing_subscriber::registry().with(file_layer).init();
            tracing::info!(path = %path, "switchyard logging to file");
        }
        Err(_) => {
            let sink_layer = tracing_subscriber::fmt::layer()
                .with_writer(std::io::sink)
                .with_filter(filter);
            tracing_subscriber::registry().with(sink_layer).init();
        }
    }
    Ok(())
}
