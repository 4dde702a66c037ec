//! Daemon configuration.
//!
//! Read from an optional `taskhub.toml` in the working directory; every
//! `TASKHUB_*` variable set in the environment overrides the file.

use std::path::Path;

use serde::Deserialize;

const CONFIG_FILE: &str = "taskhub.toml";

/// Sections of `taskhub.toml`; each one may be omitted.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
}

/// `[server]`: where to listen and where to mount the API.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Path prefix for every API route, e.g. `/api/rust`.
    pub api_prefix: String,
}

/// `[database]`
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// sqlx `SQLite` URL; `?mode=rwc` creates the file on first start.
    pub url: String,
}

/// `[logging]`
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, same syntax as `RUST_LOG`.
    pub filter: String,
}

impl Config {
    /// Load `taskhub.toml` (if present), then apply overrides from the
    /// process environment and validate the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but cannot be read or parsed,
    /// or if the resulting configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file(Path::new(CONFIG_FILE))?;
        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => Ok(toml::from_str(&content)?),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(err.into()),
        }
    }

    /// Apply `TASKHUB_*` overrides, reading each variable through `lookup`.
    ///
    /// `TASKHUB_BIND` (`host:port`) wins over `TASKHUB_HOST`/`TASKHUB_PORT`,
    /// and `RUST_LOG` wins over `TASKHUB_LOG`. Unparsable ports are ignored.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(host) = lookup("TASKHUB_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("TASKHUB_PORT").and_then(|v| v.parse().ok()) {
            self.server.port = port;
        }
        if let Some((host, port)) = lookup("TASKHUB_BIND")
            .as_deref()
            .and_then(|bind| bind.rsplit_once(':'))
        {
            self.server.host = host.to_string();
            if let Ok(port) = port.parse() {
                self.server.port = port;
            }
        }
        if let Some(prefix) = lookup("TASKHUB_API_PREFIX") {
            self.server.api_prefix = prefix;
        }
        if let Some(url) = lookup("TASKHUB_DATABASE_URL") {
            self.database.url = url;
        }
        if let Some(filter) = lookup("RUST_LOG").or_else(|| lookup("TASKHUB_LOG")) {
            self.logging.filter = filter;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("port must be non-zero".to_string()));
        }
        let prefix = self.server.api_prefix.as_str();
        if prefix == "/" || !prefix.starts_with('/') || prefix.ends_with('/') {
            return Err(ConfigError::Validation(format!(
                "api prefix {prefix:?} must look like \"/api/rust\""
            )));
        }
        Ok(())
    }

    /// `host:port` for the TCP listener.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    #[must_use]
    pub fn database_url(&self) -> &str {
        &self.database.url
    }

    #[must_use]
    pub fn api_prefix(&self) -> &str {
        &self.server.api_prefix
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            api_prefix: "/api/rust".to_string(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite:taskhub.db?mode=rwc".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "taskhubd=info,taskhub=info,tower_http=debug".to_string(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to parse taskhub.toml")]
    Parse(#[from] toml::de::Error),
    #[error("failed to read taskhub.toml")]
    Io(#[from] std::io::Error),
    #[error("invalid configuration: {0}")]
    Validation(String),
}
