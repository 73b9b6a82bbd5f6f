//! Tracing initialization.
//!
//! Library code only emits `tracing` events. Whoever embeds the engine calls
//! `init_tracing` once at startup to route them somewhere.

use thiserror::Error;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LoggingConfig;

/// Tracing setup errors.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// The configured filter directive is malformed.
    #[error("Invalid log filter: {0}")]
    Filter(#[from] ParseError),

    /// A global subscriber is already installed.
    #[error("Tracing already initialized: {0}")]
    Init(#[from] TryInitError),
}

/// Builds the event filter: `RUST_LOG` if set, otherwise the configured one.
///
/// # Errors
///
/// Returns `TelemetryError::Filter` if the configured directive is malformed.
pub fn build_filter(config: &LoggingConfig) -> Result<EnvFilter, TelemetryError> {
    let filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&config.filter))?;
    Ok(filter)
}

/// Installs the global tracing subscriber.
///
/// # Errors
///
/// Returns an error on a malformed filter or if a subscriber is already set.
pub fn init_tracing(config: &LoggingConfig) -> Result<(), TelemetryError> {
    let registry = tracing_subscriber::registry().with(build_filter(config)?);

    if config.json {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init()?;
    } else {
        registry.with(tracing_subscriber::fmt::layer()).try_init()?;
    }

    tracing::debug!(json = config.json, filter = %config.filter, "Tracing initialized");
    Ok(())
}
