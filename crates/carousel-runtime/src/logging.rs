#![forbid(unsafe_code)]

//! Subscriber setup for hosts embedding an editing session.
//!
//! The runtime only emits `tracing` events under the `carousel.*` targets.
//! Binaries and tests that want to see them call [`init`] once:
//!
//! ```no_run
//! use carousel_runtime::logging::{self, LogFormat};
//!
//! logging::init(LogFormat::Plain).ok();
//! ```
//!
//! The filter comes from `CAROUSEL_LOG` (e.g. `carousel.coalesce=trace`),
//! falling back to `info`.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::{EnvFilter, fmt};

/// Environment variable holding the filter directives.
pub const LOG_ENV: &str = "CAROUSEL_LOG";

const DEFAULT_DIRECTIVES: &str = "info";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines on stderr.
    #[default]
    Plain,
    /// One JSON object per event on stderr.
    Json,
}

/// Filter from `CAROUSEL_LOG`, or `info` if unset or invalid.
#[must_use]
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES))
}

/// Install the global subscriber.
///
/// Fails if one is already installed.
pub fn init(format: LogFormat) -> Result<(), TryInitError> {
    let registry = tracing_subscriber::registry().with(env_filter());
    match format {
        LogFormat::Plain => registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .try_init(),
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_init_fails_instead_of_panicking() {
        let _ = init(LogFormat::Json);
        assert!(init(LogFormat::Plain).is_err());
    }
}
