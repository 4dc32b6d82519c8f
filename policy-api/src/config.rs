//! Server configuration
//!
//! Read from `POLICY_*` environment variables; the CLI lets flags
//! override them.

use std::path::PathBuf;

/// Default listen port
pub const DEFAULT_PORT: u16 = 1000;

/// Largest page a client may request
pub const DEFAULT_MAX_PAGE_SIZE: usize = 1000;

/// API server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub port: u16,
    /// Directory holding the JSON data files
    pub data_dir: PathBuf,
    pub enable_cors: bool,
    pub max_page_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            data_dir: PathBuf::from("data"),
            enable_cors: true,
            max_page_size: DEFAULT_MAX_PAGE_SIZE,
        }
    }
}

impl ServerConfig {
    /// Create config from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        Self {
            bind_addr: lookup("POLICY_BIND_ADDR").unwrap_or(defaults.bind_addr),
            port: lookup("POLICY_PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            data_dir: lookup("POLICY_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            enable_cors: lookup("POLICY_ENABLE_CORS")
                .map(|v| parse_flag(&v))
                .unwrap_or(defaults.enable_cors),
            max_page_size: lookup("POLICY_MAX_PAGE_SIZE")
                .and_then(|s| s.parse().ok())
                .filter(|n| *n > 0)
                .unwrap_or(defaults.max_page_size),
        }
    }

    /// Get the full bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }
}

pub(crate) fn parse_flag(value: &str) -> bool {
    !(value.eq_ignore_ascii_case("false") || value == "0")
}
