#![forbid(unsafe_code)]

//! Logging bootstrap.
//!
//! Every modalx crate reports degraded states (missing modals, failed loaders,
//! invalid registrations) through `tracing` under the [`TARGET`] target. The
//! application owns the subscriber; [`init_tracing`] installs a JSON one for
//! production use when the `tracing-json` feature is enabled.
//!
//! The filter honors `RUST_LOG` and falls back to [`DEFAULT_FILTER`].

/// Log target shared by all modalx events.
pub const TARGET: &str = "modalx";

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "modalx=info";

/// Error from installing the global subscriber.
#[derive(Debug, Clone)]
pub struct LoggingError(String);

impl std::fmt::Display for LoggingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "failed to install tracing subscriber: {}", self.0)
    }
}

impl std::error::Error for LoggingError {}

/// Install a global JSON subscriber.
///
/// Fails if a global subscriber is already set.
#[cfg(feature = "tracing-json")]
pub fn init_tracing() -> Result<(), LoggingError> {
    use tracing_subscriber::EnvFilter;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .try_init()
        .map_err(|err| LoggingError(err.to_string()))?;
    tracing::debug!(target: TARGET, "json logging installed");
    Ok(())
}
