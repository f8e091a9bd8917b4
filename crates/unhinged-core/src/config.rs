//! Form endpoint configuration.
//!
//! Parsed from a TOML file once at startup. Every section is optional;
//! missing sections and keys fall back to defaults suitable for local
//! development.
//!
//! ```toml
//! [server]
//! port = 8787
//!
//! [store]
//! backend = "postgres"
//! url = "postgres://cards@localhost/unhinged"
//! max_connections = 5
//! absent_fields = "null"
//!
//! [errors]
//! debug = false
//!
//! [logging]
//! format = "json"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    pub server: ServerConfig,
    pub store: StoreConfig,
    pub errors: ErrorsConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { port: 8787 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    /// Connection string for the postgres backend.
    pub url: Option<String>,
    pub max_connections: u32,
    pub absent_fields: AbsentFieldPolicy,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::Postgres,
            url: None,
            max_connections: 5,
            absent_fields: AbsentFieldPolicy::Null,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    Postgres,
    Memory,
}

/// How optional card fields that were absent (or sent empty) are written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AbsentFieldPolicy {
    /// Store SQL `NULL`.
    #[default]
    Null,
    /// Store an empty string.
    Empty,
}

impl AbsentFieldPolicy {
    /// Column value for an optional field under this policy.
    pub fn column_value(self, value: Option<&str>) -> Option<String> {
        match (value, self) {
            (Some(v), _) if !v.is_empty() => Some(v.to_string()),
            (_, AbsentFieldPolicy::Null) => None,
            (_, AbsentFieldPolicy::Empty) => Some(String::new()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ErrorsConfig {
    /// Include the underlying failure message in 500 responses.
    pub debug: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FormConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: FormConfig = toml::from_str(content)?;
        Ok(config)
    }

    /// Check cross-field constraints that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.store.backend == StoreBackend::Postgres
            && self.store.url.as_deref().is_none_or(str::is_empty)
        {
            return Err(ConfigError::Invalid(
                "store.url is required for the postgres backend".to_string(),
            ));
        }
        if self.store.max_connections == 0 {
            return Err(ConfigError::Invalid(
                "store.max_connections must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_document_yields_defaults() {
        let config = FormConfig::from_toml_str("").unwrap();
        assert_eq!(config, FormConfig::default());
        assert_eq!(config.server.port, 8787);
        assert!(!config.errors.debug);
        assert_eq!(config.store.absent_fields, AbsentFieldPolicy::Null);
    }

    #[test]
    fn parse_full_document() {
        let toml_str = r#"
[server]
port = 9000

[store]
backend = "memory"
max_connections = 2
absent_fields = "empty"

[errors]
debug = true

[logging]
format = "json"
"#;
        let config = FormConfig::from_toml_str(toml_str).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.store.backend, StoreBackend::Memory);
        assert_eq!(config.store.max_connections, 2);
        assert_eq!(config.store.absent_fields, AbsentFieldPolicy::Empty);
        assert!(config.errors.debug);
        assert_eq!(config.logging.format, LogFormat::Json);
        config.validate().unwrap();
    }

    #[test]
    fn unknown_backend_is_a_parse_error() {
        let err = FormConfig::from_toml_str("[store]\nbackend = \"d1\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn postgres_without_url_is_invalid() {
        let config = FormConfig::default();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn from_file_reads_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[store]\nurl = \"postgres://localhost/cards\"").unwrap();

        let config = FormConfig::from_file(file.path()).unwrap();
        assert_eq!(config.store.url.as_deref(), Some("postgres://localhost/cards"));
        config.validate().unwrap();
    }

    #[test]
    fn from_file_missing_is_read_error() {
        let err = FormConfig::from_file(Path::new("/nonexistent/unhinged.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read(_)));
    }

    #[test]
    fn absent_policy_column_values() {
        assert_eq!(AbsentFieldPolicy::Null.column_value(None), None);
        assert_eq!(AbsentFieldPolicy::Null.column_value(Some("")), None);
        assert_eq!(AbsentFieldPolicy::Empty.column_value(None), Some(String::new()));
        assert_eq!(
            AbsentFieldPolicy::Empty.column_value(Some("texto")),
            Some("texto".to_string())
        );
        assert_eq!(
            AbsentFieldPolicy::Null.column_value(Some("texto")),
            Some("texto".to_string())
        );
    }
}
