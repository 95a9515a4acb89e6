//! Configuration loading and management

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Environment variable naming the YAML configuration file
pub const CONFIG_ENV_VAR: &str = "STUDY_TRAVEL_CONFIG";

/// Server configuration
///
/// Every field has a default, so a configuration file only needs the
/// values it changes.
///
/// ```yaml
/// host: 0.0.0.0
/// port: 9000
/// base_uri: https://travel.example.org
/// page_size: 10
/// log_filter: studytravel=debug,tower_http=info
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind
    pub host: String,

    /// Port to bind
    pub port: u16,

    /// Public base URI used in `Link` and `Location` headers
    ///
    /// Defaults to `http://{host}:{port}`.
    pub base_uri: Option<String>,

    /// Number of items per collection page
    pub page_size: usize,

    /// Default `tracing` filter when `RUST_LOG` is not set
    pub log_filter: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 8080,
            base_uri: None,
            page_size: 20,
            log_filter: "studytravel=info,tower_http=info".to_string(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file '{}'", path))?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Load from `path` when given, defaults otherwise
    pub fn load(path: Option<&str>) -> Result<Self> {
        match path {
            Some(path) => Self::from_yaml_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Load from the file named by [`CONFIG_ENV_VAR`], defaults if it is unset
    pub fn from_env() -> Result<Self> {
        let path = std::env::var(CONFIG_ENV_VAR).ok();
        Self::load(path.as_deref())
    }

    /// Socket address to bind, `host:port`
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Base URI without a trailing slash
    pub fn base_uri(&self) -> String {
        match &self.base_uri {
            Some(uri) => uri.trim_end_matches('/').to_string(),
            None => format!("http://{}:{}", self.host, self.port),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_address(), "localhost:8080");
        assert_eq!(config.base_uri(), "http://localhost:8080");
        assert_eq!(config.page_size, 20);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = ServerConfig::from_yaml_str("port: 9000\npage_size: 5\n").unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.page_size, 5);
        assert_eq!(config.host, "localhost");
        assert_eq!(config.base_uri(), "http://localhost:9000");
    }

    #[test]
    fn test_explicit_base_uri_is_trimmed() {
        let config =
            ServerConfig::from_yaml_str("base_uri: https://travel.example.org/\n").unwrap();
        assert_eq!(config.base_uri(), "https://travel.example.org");
    }

    #[test]
    fn test_yaml_serialization() {
        let config = ServerConfig::default();
        let yaml = serde_yaml::to_string(&config).unwrap();

        let parsed = ServerConfig::from_yaml_str(&yaml).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "host: 0.0.0.0").unwrap();
        writeln!(file, "port: 3000").unwrap();

        let path = file.path().to_str().unwrap();
        let config = ServerConfig::load(Some(path)).unwrap();
        assert_eq!(config.bind_address(), "0.0.0.0:3000");
    }

    #[test]
    fn test_load_missing_file_fails() {
        let result = ServerConfig::load(Some("/definitely/not/here.yaml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_without_path_uses_defaults() {
        assert_eq!(ServerConfig::load(None).unwrap(), ServerConfig::default());
    }
}
