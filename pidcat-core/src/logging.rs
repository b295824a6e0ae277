use std::io;
use tracing_subscriber::{EnvFilter, fmt};

/// Environment variable that switches diagnostics to JSON lines.
pub const LOG_JSON_ENV: &str = "PIDCAT_LOG_JSON";

/// Initialize diagnostic logging.
///
/// Rendered log output owns stdout, so every diagnostic goes to stderr:
/// - `RUST_LOG` selects the filter (defaults to "warn" if not set)
/// - `PIDCAT_LOG_JSON` switches to flattened JSON events for machine consumption
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    if std::env::var_os(LOG_JSON_ENV).is_some() {
        fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .json()
            .flatten_event(true)
            .init();
    } else {
        fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .compact()
            .init();
    }
}
