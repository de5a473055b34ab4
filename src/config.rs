// src/config.rs
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::utils::error::AppError;

/// Service configuration, read once at startup and handed to the server
/// state. Request handlers never reload it.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Bind host for the HTTP listener
    #[serde(default = "default_host")]
    pub host: String,

    /// Bind port for the HTTP listener
    #[serde(default = "default_port")]
    pub port: u16,

    /// Base URL prefix for CEX documents; `<source>.cex` is appended per request
    pub cex_source: String,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

impl ServerConfig {
    /// Loads the configuration from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, AppError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)?;

        serde_json::from_str(&raw).map_err(|e| {
            AppError::Config(format!("invalid config file {}: {}", path.display(), e))
        })
    }

    /// The address the HTTP listener binds to.
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Resolves a request's source name to the full document URL.
    pub fn source_url(&self, source: &str) -> String {
        format!("{}{}.cex", self.cex_source, source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_config_from_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"host": "0.0.0.0", "port": 9000, "cex_source": "http://corpora.example.org/cex/"}}"#
        )
        .unwrap();

        let config = ServerConfig::load(file.path()).unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 9000);
        assert_eq!(config.listen_addr(), "0.0.0.0:9000");
    }

    #[test]
    fn host_and_port_have_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"cex_source": "http://corpora.example.org/cex/"}}"#).unwrap();

        let config = ServerConfig::load(file.path()).unwrap();
        assert_eq!(config.listen_addr(), "127.0.0.1:8000");
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = ServerConfig::load("/nonexistent/config.json").unwrap_err();
        assert!(matches!(err, AppError::Io(_)));
    }

    #[test]
    fn invalid_json_is_a_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let err = ServerConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn source_url_appends_the_cex_suffix() {
        let config = ServerConfig {
            host: default_host(),
            port: default_port(),
            cex_source: "http://corpora.example.org/cex/".to_string(),
        };
        assert_eq!(
            config.source_url("iliad"),
            "http://corpora.example.org/cex/iliad.cex"
        );
    }
}
