//! Tracing subscriber setup.

use tracing::Level;
use tracing_subscriber::EnvFilter;

fn parse_level(level: &str) -> Level {
    match level.to_uppercase().as_str() {
        "TRACE" => Level::TRACE,
        "DEBUG" => Level::DEBUG,
        "INFO" => Level::INFO,
        "WARN" | "WARNING" => Level::WARN,
        "ERROR" => Level::ERROR,
        _ => Level::INFO,
    }
}

/// Install the global subscriber, writing to stderr.
///
/// `RUST_LOG` overrides `log_level` when set. Calling this twice is harmless.
pub fn setup_logging(log_level: &str, json_format: bool) {
    let level = parse_level(log_level);
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::default().add_directive(level.into()));

    let result = if json_format {
        tracing_subscriber::fmt()
            .json()
            .with_target(true)
            .with_writer(std::io::stderr)
            .with_env_filter(filter)
            .try_init()
    } else {
        tracing_subscriber::fmt()
            .with_target(false)
            .with_writer(std::io::stderr)
            .with_env_filter(filter)
            .try_init()
    };

    if result.is_ok() {
        tracing::debug!(log_level = %level, json = json_format, "Logging initialized");
    }
}
