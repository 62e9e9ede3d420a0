//! Logging setup utilities for the slideshow server.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber with the specified default log level.
///
/// The filter covers the server crate, this crate and the binary itself.
/// The log level can be overridden using the `RUST_LOG` environment variable.
///
/// # Arguments
///
/// * `binary_name` - The name of the binary (e.g., "utsushie-server")
/// * `default_level` - The default log level (e.g., "debug", "info", "warn", "error")
///
/// # Examples
///
/// ```no_run
/// use utsushie_shared::logger::setup_logger;
///
/// setup_logger("utsushie-server", "debug");
/// ```
pub fn setup_logger(binary_name: &str, default_log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter(binary_name, default_log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::debug!(
        "Logger initialized for '{}' (default level: {})",
        binary_name,
        default_log_level
    );
}

/// Build the filter directive used when `RUST_LOG` is not set.
///
/// The binary gets its own directive only when its target differs from the
/// crates already listed.
fn default_filter(binary_name: &str, default_log_level: &str) -> String {
    let shared = env!("CARGO_PKG_NAME").replace('-', "_");
    let bin = binary_name.replace('-', "_");

    let mut targets = vec!["utsushie_server".to_string(), shared];
    if !targets.contains(&bin) {
        targets.push(bin);
    }
    targets.push("tower_http".to_string());

    targets
        .iter()
        .map(|target| format!("{}={}", target, default_log_level))
        .collect::<Vec<_>>()
        .join(",")
}
