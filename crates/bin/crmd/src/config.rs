//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `crm.toml` in the working directory. Every field has a default,
//! so the file is optional. `CRM_*` environment variables (and `RUST_LOG`)
//! take precedence over file values.

use std::path::Path;

use serde::Deserialize;
use tracing_subscriber::EnvFilter;

const CONFIG_FILE: &str = "crm.toml";

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to (e.g. `0.0.0.0`).
    pub host: String,
    pub port: u16,
}

/// `SQLite` database configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// sqlx connection URL, e.g. `sqlite:crm.db?mode=rwc`.
    pub url: String,
    pub max_connections: u32,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite:crm.db?mode=rwc".to_string(),
            max_connections: crm_adapter_storage_sqlite_sqlx::DEFAULT_MAX_CONNECTIONS,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "crmd=info,crm=info,tower_http=debug".to_string(),
        }
    }
}

impl Config {
    /// Load `crm.toml` (if present), then apply environment overrides and
    /// validate the result.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file exists but cannot be read or
    /// parsed, or if an override or the final values are invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file(Path::new(CONFIG_FILE))?;
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => Ok(toml::from_str(&content)?),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    /// Apply overrides resolved through `lookup`, lowest precedence first.
    fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(host) = lookup("CRM_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("CRM_PORT") {
            self.server.port = parse_port("CRM_PORT", &port)?;
        }
        if let Some(bind) = lookup("CRM_BIND") {
            let (host, port) = bind
                .rsplit_once(':')
                .ok_or_else(|| ConfigError::InvalidOverride {
                    key: "CRM_BIND",
                    value: bind.clone(),
                })?;
            self.server.port = parse_port("CRM_BIND", port)?;
            self.server.host = host.to_string();
        }
        if let Some(url) = lookup("CRM_DATABASE_URL") {
            self.database.url = url;
        }
        if let Some(max) = lookup("CRM_DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections =
                max.parse().map_err(|_| ConfigError::InvalidOverride {
                    key: "CRM_DATABASE_MAX_CONNECTIONS",
                    value: max.clone(),
                })?;
        }
        if let Some(filter) = lookup("CRM_LOG").or_else(|| lookup("RUST_LOG")) {
            self.logging.filter = filter;
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::ZeroPort);
        }
        if self.database.url.is_empty() {
            return Err(ConfigError::EmptyDatabaseUrl);
        }
        if self.database.max_connections == 0 {
            return Err(ConfigError::ZeroMaxConnections);
        }
        self.log_filter()?;
        Ok(())
    }

    /// Parse the logging filter directive.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidLogFilter`] when the directive is not
    /// valid `RUST_LOG` syntax.
    pub fn log_filter(&self) -> Result<EnvFilter, ConfigError> {
        EnvFilter::try_new(&self.logging.filter).map_err(|source| ConfigError::InvalidLogFilter {
            filter: self.logging.filter.clone(),
            source,
        })
    }

    /// Return the `host:port` bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Storage adapter settings for the `[database]` section.
    #[must_use]
    pub fn storage(&self) -> crm_adapter_storage_sqlite_sqlx::Config {
        crm_adapter_storage_sqlite_sqlx::Config::new(self.database.url.as_str())
            .with_max_connections(self.database.max_connections)
    }
}

fn parse_port(key: &'static str, value: &str) -> Result<u16, ConfigError> {
    value.parse().map_err(|_| ConfigError::InvalidOverride {
        key,
        value: value.to_string(),
    })
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    #[error("invalid value {value:?} for {key}")]
    InvalidOverride { key: &'static str, value: String },
    #[error("invalid configuration: port must be non-zero")]
    ZeroPort,
    #[error("invalid configuration: database url must not be empty")]
    EmptyDatabaseUrl,
    #[error("invalid configuration: database max_connections must be non-zero")]
    ZeroMaxConnections,
    #[error("invalid log filter {filter:?}")]
    InvalidLogFilter {
        filter: String,
        #[source]
        source: tracing_subscriber::filter::ParseError,
    },
}
