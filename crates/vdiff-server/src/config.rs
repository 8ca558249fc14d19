use std::net::SocketAddr;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ServerError, ServerResult};

/// Server settings. Every field has a default, so a TOML file only needs
/// the keys it wants to override.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// Largest accepted request body. Alignment cost grows with the
    /// product of input lengths, so this is the latency bound.
    pub max_input_bytes: usize,
    /// Context lines for `/diff` requests that do not specify any.
    pub default_context_lines: i64,
    /// Answer cross-origin requests from any origin.
    pub enable_cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8000)),
            max_input_bytes: 2 * 1024 * 1024,
            default_context_lines: 3,
            enable_cors: false,
        }
    }
}

impl ServerConfig {
    /// Parse a TOML document.
    pub fn from_toml_str(text: &str) -> ServerResult<Self> {
        toml::from_str(text).map_err(|e| ServerError::Config(e.to_string()))
    }

    /// Read and parse a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> ServerResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config() {
        let c = ServerConfig::default();
        assert_eq!(c.bind_addr, "127.0.0.1:8000".parse::<SocketAddr>().unwrap());
        assert_eq!(c.max_input_bytes, 2 * 1024 * 1024);
        assert_eq!(c.default_context_lines, 3);
        assert!(!c.enable_cors);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let text = "bind_addr = \"0.0.0.0:9000\"\nenable_cors = true\n";
        let c = ServerConfig::from_toml_str(text).unwrap();
        assert_eq!(c.bind_addr, "0.0.0.0:9000".parse::<SocketAddr>().unwrap());
        assert!(c.enable_cors);
        assert_eq!(c.default_context_lines, 3);
    }

    #[test]
    fn invalid_toml_is_config_error() {
        let err = ServerConfig::from_toml_str("max_input_bytes = \"lots\"").unwrap_err();
        assert!(matches!(err, ServerError::Config(_)));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "max_input_bytes = 1024").unwrap();
        let c = ServerConfig::from_file(file.path()).unwrap();
        assert_eq!(c.max_input_bytes, 1024);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = ServerConfig::from_file("/nonexistent/vdiff.toml").unwrap_err();
        assert!(matches!(err, ServerError::Io(_)));
    }
}
