use std::path::Path;
use std::time::Duration;

use ::config::{Config, Environment, File};
use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Prefix for environment overrides, e.g. `SMS_HISTORY__DATABASE__PATH`
pub const ENV_PREFIX: &str = "SMS_HISTORY";

/// Application configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// History database settings
    pub database: DatabaseConfig,
    /// Log output settings
    pub logging: LoggingConfig,
}

/// History database settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite file; a `sqlite:` prefix is accepted and stripped
    pub path: String,
    /// Pool size
    pub max_connections: u32,
    /// How long to wait for a pooled connection
    pub connection_timeout_secs: u64,
    /// How long SQLite waits on a locked database before reporting busy
    pub busy_timeout_ms: u64,
}

/// Log output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is unset
    pub level: String,
    /// Optional log file; rotated daily in its parent directory
    pub file_path: Option<String>,
    /// "json" or "text"
    pub format: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: "data/mmclisms.db".to_string(),
            max_connections: 4,
            connection_timeout_secs: 30,
            busy_timeout_ms: 5000,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file_path: None,
            format: "text".to_string(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database: DatabaseConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl DatabaseConfig {
    /// Pool checkout timeout
    #[must_use]
    pub const fn connection_timeout(&self) -> Duration {
        Duration::from_secs(self.connection_timeout_secs)
    }

    /// SQLite busy handler timeout
    #[must_use]
    pub const fn busy_timeout(&self) -> Duration {
        Duration::from_millis(self.busy_timeout_ms)
    }
}

impl AppConfig {
    /// Load configuration from the default locations
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration from multiple sources with precedence
    ///
    /// Defaults, then `config/default`, `config/local`, the explicit file if
    /// given, and finally `SMS_HISTORY__*` environment variables.
    pub fn load_from(explicit: Option<&Path>) -> Result<Self> {
        let defaults = Self::default();

        let mut builder = Config::builder()
            .set_default("database.path", defaults.database.path)?
            .set_default("database.max_connections", defaults.database.max_connections)?
            .set_default(
                "database.connection_timeout_secs",
                defaults.database.connection_timeout_secs,
            )?
            .set_default("database.busy_timeout_ms", defaults.database.busy_timeout_ms)?
            .set_default("logging.level", defaults.logging.level)?
            .set_default("logging.format", defaults.logging.format)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false));

        if let Some(path) = explicit {
            builder = builder.add_source(File::from(path).required(true));
        }

        let config = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?;

        let app_config: Self = config
            .try_deserialize()
            .map_err(|e| anyhow::anyhow!("Failed to deserialize configuration: {}", e))?;

        app_config.validate()?;

        Ok(app_config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.database.path.trim().is_empty() {
            return Err(anyhow::anyhow!("database.path must not be empty"));
        }
        if self.database.max_connections == 0 {
            return Err(anyhow::anyhow!("max_connections must be greater than 0"));
        }
        if self.database.connection_timeout_secs == 0 {
            return Err(anyhow::anyhow!("connection_timeout_secs must be greater than 0"));
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            return Err(anyhow::anyhow!(
                "Invalid log level: {}. Must be one of: {:?}",
                self.logging.level,
                valid_levels
            ));
        }

        let valid_formats = ["text", "json"];
        if !valid_formats.contains(&self.logging.format.as_str()) {
            return Err(anyhow::anyhow!(
                "Invalid log format: {}. Must be one of: {:?}",
                self.logging.format,
                valid_formats
            ));
        }

        Ok(())
    }

    /// Get log level from environment or config
    #[must_use]
    pub fn get_log_level(&self) -> String {
        std::env::var("RUST_LOG").unwrap_or_else(|_| self.logging.level.clone())
    }
}
