//! Logging setup utilities for the Kaiwa chat client.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Build the default filter directive for the given log targets.
///
/// Every target gets the same level, e.g. `kaiwa_client=info,kaiwa_shared=info`.
pub fn default_directive(targets: &[&str], default_log_level: &str) -> String {
    targets
        .iter()
        .map(|target| format!("{}={}", target.replace('-', "_"), default_log_level))
        .collect::<Vec<_>>()
        .join(",")
}

/// Initialize the tracing subscriber with the specified default log level.
///
/// The log level can be overridden using the `RUST_LOG` environment variable.
/// Logs go to stderr so they do not interleave with the chat panel on stdout.
///
/// # Arguments
///
/// * `targets` - Crate or binary names to enable (e.g. `["kaiwa-client"]`)
/// * `default_log_level` - The default log level (e.g., "debug", "info", "warn", "error")
///
/// # Examples
///
/// ```no_run
/// use kaiwa_shared::logger::setup_logger;
///
/// setup_logger(&["kaiwa-client"], "info");
/// ```
pub fn setup_logger(targets: &[&str], default_log_level: &str) {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_directive(targets, default_log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
