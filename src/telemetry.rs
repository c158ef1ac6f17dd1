//! Process-wide `tracing` subscriber setup.

use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Errors raised while installing the subscriber.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// The `RUST_LOG` or configured filter directive did not parse.
    #[error("invalid log filter `{directive}`: {source}")]
    Filter {
        /// Directive that failed to parse.
        directive: String,
        /// Parser error.
        source: tracing_subscriber::filter::ParseError,
    },
    /// A global subscriber was already installed.
    #[error("failed to install log subscriber: {0}")]
    Install(String),
}

/// Installs a formatting subscriber writing to stderr.
///
/// A non-blank `RUST_LOG` takes precedence over `filter`, which usually comes
/// from the `[logging]` config section. Stdout stays free for command output.
///
/// # Errors
///
/// Returns [`TelemetryError::Filter`] when the directive in effect is
/// malformed, whether it came from `RUST_LOG` or from `filter`, and
/// [`TelemetryError::Install`] when a subscriber is already installed.
pub fn init(filter: &str) -> Result<(), TelemetryError> {
    let from_env = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let env_filter = build_filter(from_env.as_deref(), filter)?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| TelemetryError::Install(err.to_string()))
}

fn build_filter(from_env: Option<&str>, fallback: &str) -> Result<EnvFilter, TelemetryError> {
    let directive = from_env
        .filter(|value| !value.trim().is_empty())
        .unwrap_or(fallback);
    EnvFilter::try_new(directive).map_err(|source| TelemetryError::Filter {
        directive: directive.to_owned(),
        source,
    })
}
