//! Configuration loading and management
//!
//! Settings come from (lowest to highest precedence): built-in defaults, an
//! optional YAML file, then environment variables.
//!
//! ```yaml
//! host: 0.0.0.0
//! port: 3001
//! data_file: data/pokemon.json
//! api_prefix: /api
//! environment: development
//! ```

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable naming the YAML config file
pub const CONFIG_FILE_ENV: &str = "POKEMON_API_CONFIG";

/// Deployment environment
///
/// Controls whether server-side error causes are exposed in responses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    #[default]
    Production,
}

impl Environment {
    /// Whether error responses may include internal diagnostic detail
    pub fn exposes_error_details(self) -> bool {
        self != Environment::Production
    }

    fn parse(raw: &str) -> Result<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "production" | "prod" => Ok(Environment::Production),
            other => bail!("unknown environment '{}'", other),
        }
    }
}

/// Server configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind
    pub host: String,

    /// TCP port to listen on
    pub port: u16,

    /// JSON document holding the catalog
    pub data_file: PathBuf,

    /// Prefix for the catalog routes (`{api_prefix}/pokemon`)
    pub api_prefix: String,

    pub environment: Environment,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3001,
            data_file: PathBuf::from("data/pokemon.json"),
            api_prefix: "/api".to_string(),
            environment: Environment::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file '{}'", path))?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Load from the process environment
    ///
    /// Reads the YAML file named by `POKEMON_API_CONFIG` if set, then applies
    /// `HOST`, `PORT`, `POKEMON_DATA_FILE`, `API_PREFIX` and `APP_ENV`.
    pub fn from_env() -> Result<Self> {
        let base = match std::env::var(CONFIG_FILE_ENV) {
            Ok(path) => Self::from_yaml_file(&path)?,
            Err(_) => Self::default(),
        };
        base.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from a key lookup (normally the process environment)
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("HOST") {
            self.host = host;
        }
        if let Some(port) = lookup("PORT") {
            self.port = port
                .trim()
                .parse()
                .with_context(|| format!("invalid PORT '{}'", port))?;
        }
        if let Some(data_file) = lookup("POKEMON_DATA_FILE") {
            self.data_file = PathBuf::from(data_file);
        }
        if let Some(prefix) = lookup("API_PREFIX") {
            self.api_prefix = prefix;
        }
        if let Some(environment) = lookup("APP_ENV") {
            self.environment = Environment::parse(&environment)?;
        }
        Ok(self)
    }

    /// `host:port` for binding the listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Prefix normalized to `/segment` form, or empty for the root
    pub fn normalized_prefix(&self) -> String {
        let trimmed = self.api_prefix.trim().trim_matches('/');
        if trimmed.is_empty() {
            String::new()
        } else {
            format!("/{}", trimmed)
        }
    }
}
