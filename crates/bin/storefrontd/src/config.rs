//! Configuration loading: TOML file with environment variable overrides.
//!
//! Looks for `storefront.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values.

use std::time::Duration;

use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// `SQLite` settings.
    pub database: DatabaseConfig,
    /// Redis settings.
    pub redis: RedisConfig,
    /// Browsing history settings.
    pub history: HistoryConfig,
    /// Address book settings.
    pub addresses: AddressesConfig,
    /// Token lifetimes and the activation link.
    pub auth: AuthConfig,
    /// Static homepage generation.
    pub homepage: HomepageConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to (e.g. `0.0.0.0`).
    pub host: String,
    /// TCP port.
    pub port: u16,
}

/// `SQLite` database configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// `SQLite` connection URL or file path.
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RedisConfig {
    pub url: String,
    /// Upper bound on each command, in milliseconds.
    pub command_timeout_ms: u64,
}

/// Where browsing histories are kept.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryBackendKind {
    #[default]
    Redis,
    Sqlite,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Entries kept per user.
    pub limit: usize,
    pub backend: HistoryBackendKind,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct AddressesConfig {
    /// Non-deleted addresses allowed per user.
    pub limit: usize,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub token_ttl_secs: u64,
    pub email_token_ttl_secs: u64,
    /// Page the activation link points at; the token is appended.
    pub verify_url: String,
    /// bcrypt work factor.
    pub bcrypt_cost: u32,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct HomepageConfig {
    /// Directory the homepage is written to, served under `/static`.
    pub output_dir: String,
    /// Seconds between two regenerations.
    pub interval_secs: u64,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

impl Config {
    /// Load configuration from `storefront.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if a
    /// value is out of range.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("storefront.toml")?;
        config.apply_env_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(val) = var("STOREFRONT_HOST") {
            self.server.host = val;
        }
        if let Some(port) = var("STOREFRONT_PORT").and_then(|val| val.parse().ok()) {
            self.server.port = port;
        }
        if let Some(val) = var("STOREFRONT_BIND")
            && let Some((host, port)) = val.rsplit_once(':')
        {
            self.server.host = host.to_string();
            if let Ok(port) = port.parse() {
                self.server.port = port;
            }
        }
        if let Some(val) = var("STOREFRONT_DATABASE_URL") {
            self.database.url = val;
        }
        if let Some(val) = var("STOREFRONT_REDIS_URL") {
            self.redis.url = val;
        }
        if let Some(limit) = var("STOREFRONT_HISTORY_LIMIT").and_then(|val| val.parse().ok()) {
            self.history.limit = limit;
        }
        if let Some(val) = var("STOREFRONT_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("port must be non-zero".to_string()));
        }
        if self.history.limit == 0 {
            return Err(ConfigError::Validation(
                "history.limit must be at least 1".to_string(),
            ));
        }
        if self.addresses.limit == 0 {
            return Err(ConfigError::Validation(
                "addresses.limit must be at least 1".to_string(),
            ));
        }
        if self.homepage.interval_secs == 0 {
            return Err(ConfigError::Validation(
                "homepage.interval_secs must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Return the `host:port` bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl RedisConfig {
    #[must_use]
    pub fn command_timeout(&self) -> Duration {
        Duration::from_millis(self.command_timeout_ms)
    }
}

impl AuthConfig {
    #[must_use]
    pub fn token_ttl(&self) -> Duration {
        Duration::from_secs(self.token_ttl_secs)
    }

    #[must_use]
    pub fn email_token_ttl(&self) -> Duration {
        Duration::from_secs(self.email_token_ttl_secs)
    }
}

impl HomepageConfig {
    #[must_use]
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite:storefront.db?mode=rwc".to_string(),
            max_connections: 5,
        }
    }
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self {
            url: "redis://127.0.0.1:6379/".to_string(),
            command_timeout_ms: 2000,
        }
    }
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            limit: 5,
            backend: HistoryBackendKind::default(),
        }
    }
}

impl Default for AddressesConfig {
    fn default() -> Self {
        Self { limit: 20 }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_ttl_secs: 24 * 60 * 60,
            email_token_ttl_secs: 24 * 60 * 60,
            verify_url: "http://127.0.0.1:8080/success_verify_email.html".to_string(),
            bcrypt_cost: bcrypt::DEFAULT_COST,
        }
    }
}

impl Default for HomepageConfig {
    fn default() -> Self {
        Self {
            output_dir: "static".to_string(),
            interval_secs: 300,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "storefrontd=info,storefront=info,tower_http=debug".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
