//! Application configuration management.

use serde::Deserialize;

use crate::types::CurrencyFormat;

/// Application configuration.
///
/// Every section has defaults, so an empty configuration is valid.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Currency presentation settings.
    pub display: CurrencyFormat,
    /// Boundary transformer settings.
    pub boundary: BoundaryConfig,
    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// How the boundary transformer treats a registered money field holding a
/// value that cannot be money (e.g. a boolean).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MismatchPolicy {
    /// Log a warning and substitute zero.
    #[default]
    Lenient,
    /// Fail the whole decode.
    Strict,
}

/// Boundary transformer configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BoundaryConfig {
    /// Handling of mis-shaped money fields.
    pub mismatch_policy: MismatchPolicy,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub filter: String,
    /// Emit JSON lines instead of human-readable output.
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
            json: false,
        }
    }
}

fn default_filter() -> String {
    "monto=info".to_string()
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// Sources, later ones winning: `config/default`, `config/{RUN_MODE}`,
    /// then `MONTO__SECTION__KEY` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();

        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("MONTO").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
