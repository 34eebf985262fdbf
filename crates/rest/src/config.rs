//! Server configuration for the customer REST API.
//!
//! Configuration comes from command line arguments with environment variable
//! fallbacks, or is built programmatically.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `BREWERY_SERVER_PORT` | 8080 | Server port |
//! | `BREWERY_SERVER_HOST` | 127.0.0.1 | Host to bind |
//! | `BREWERY_LOG_LEVEL` | info | Log level |
//! | `BREWERY_MAX_BODY_SIZE` | 1048576 | Max request body (bytes) |
//! | `BREWERY_REQUEST_TIMEOUT` | 30 | Request timeout (seconds) |
//! | `BREWERY_ENABLE_CORS` | true | Enable CORS |
//! | `BREWERY_CORS_ORIGINS` | * | Allowed origins |
//! | `BREWERY_CORS_METHODS` | GET,POST,PUT,DELETE,OPTIONS | Allowed methods |
//! | `BREWERY_CORS_HEADERS` | Content-Type,Accept,X-Request-ID | Allowed headers |
//! | `BREWERY_BASE_URL` | http://localhost:8080 | Base URL for Location headers |
//! | `BREWERY_STORAGE_BACKEND` | memory | `memory` or `sqlite` |
//! | `BREWERY_DATABASE_URL` | | SQLite path (`:memory:` for in-memory) |
//! | `BREWERY_ENABLE_REQUEST_ID` | true | Set and propagate `x-request-id` |
//! | `BREWERY_DOCS_DIR` | | Record API documentation snippets into this directory |
//!
//! # Example
//!
//! ```rust
//! use brewery_rest::ServerConfig;
//!
//! let config = ServerConfig {
//!     port: 3000,
//!     host: "0.0.0.0".to_string(),
//!     ..Default::default()
//! };
//! assert_eq!(config.socket_addr(), "0.0.0.0:3000");
//! ```

use std::fmt;
use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};

/// Which storage backend the server runs against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StorageBackendMode {
    /// Process-local map, lost on restart.
    Memory,
    /// SQLite database (requires the `sqlite` feature).
    Sqlite,
}

impl fmt::Display for StorageBackendMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageBackendMode::Memory => write!(f, "memory"),
            StorageBackendMode::Sqlite => write!(f, "sqlite"),
        }
    }
}

/// Server configuration for the customer REST API.
#[derive(Debug, Clone, Parser)]
#[command(name = "brewery")]
#[command(about = "Brewery customer REST API server")]
pub struct ServerConfig {
    /// Port to listen on.
    #[arg(short, long, env = "BREWERY_SERVER_PORT", default_value = "8080")]
    pub port: u16,

    /// Host address to bind to.
    #[arg(long, env = "BREWERY_SERVER_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, env = "BREWERY_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Maximum request body size in bytes.
    #[arg(long, env = "BREWERY_MAX_BODY_SIZE", default_value = "1048576")]
    pub max_body_size: usize,

    /// Request timeout in seconds.
    #[arg(long, env = "BREWERY_REQUEST_TIMEOUT", default_value = "30")]
    pub request_timeout: u64,

    /// Enable CORS.
    #[arg(long, env = "BREWERY_ENABLE_CORS", default_value = "true", action = ArgAction::Set)]
    pub enable_cors: bool,

    /// Allowed CORS origins (comma-separated, or * for all).
    #[arg(long, env = "BREWERY_CORS_ORIGINS", default_value = "*")]
    pub cors_origins: String,

    /// Allowed CORS methods (comma-separated, or * for all).
    #[arg(
        long,
        env = "BREWERY_CORS_METHODS",
        default_value = "GET,POST,PUT,DELETE,OPTIONS"
    )]
    pub cors_methods: String,

    /// Allowed CORS headers (comma-separated, or * for all).
    #[arg(
        long,
        env = "BREWERY_CORS_HEADERS",
        default_value = "Content-Type,Accept,X-Request-ID"
    )]
    pub cors_headers: String,

    /// Base URL for the server (used in Location headers).
    #[arg(long, env = "BREWERY_BASE_URL", default_value = "http://localhost:8080")]
    pub base_url: String,

    /// Storage backend.
    #[arg(long, env = "BREWERY_STORAGE_BACKEND", value_enum, default_value = "memory")]
    pub storage_backend: StorageBackendMode,

    /// Database path for the SQLite backend.
    #[arg(long, env = "BREWERY_DATABASE_URL")]
    pub database_url: Option<String>,

    /// Enable request ID tracking.
    #[arg(long, env = "BREWERY_ENABLE_REQUEST_ID", default_value = "true", action = ArgAction::Set)]
    pub enable_request_id: bool,

    /// Directory to write recorded API documentation snippets to.
    #[arg(long, env = "BREWERY_DOCS_DIR")]
    pub docs_dir: Option<PathBuf>,

    /// Maximum number of snippets held in memory between flushes.
    #[arg(long, env = "BREWERY_DOCS_CAPACITY", default_value = "1000")]
    pub docs_capacity: usize,

    /// Seconds between flushes of recorded snippets to `docs_dir`.
    #[arg(long, env = "BREWERY_DOCS_FLUSH_INTERVAL", default_value = "30")]
    pub docs_flush_interval: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            host: "127.0.0.1".to_string(),
            log_level: "info".to_string(),
            max_body_size: 1024 * 1024, // 1MB
            request_timeout: 30,
            enable_cors: true,
            cors_origins: "*".to_string(),
            cors_methods: "GET,POST,PUT,DELETE,OPTIONS".to_string(),
            cors_headers: "Content-Type,Accept,X-Request-ID".to_string(),
            base_url: "http://localhost:8080".to_string(),
            storage_backend: StorageBackendMode::Memory,
            database_url: None,
            enable_request_id: true,
            docs_dir: None,
            docs_capacity: 1000,
            docs_flush_interval: 30,
        }
    }
}

impl ServerConfig {
    /// Creates a new ServerConfig from environment variables.
    ///
    /// Falls back to defaults if parsing fails.
    pub fn from_env() -> Self {
        Self::try_parse_from(["brewery"]).unwrap_or_default()
    }

    /// Returns the socket address to bind to.
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Returns the base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    /// Validates the configuration and returns all errors found.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.port == 0 {
            errors.push("Port cannot be 0".to_string());
        }

        if self.max_body_size == 0 {
            errors.push("Max body size cannot be 0".to_string());
        }

        if self.request_timeout == 0 {
            errors.push("Request timeout cannot be 0".to_string());
        }

        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            errors.push(format!(
                "Base URL must start with http:// or https://: {}",
                self.base_url
            ));
        }

        if self.docs_capacity == 0 {
            errors.push("Docs capacity cannot be 0".to_string());
        }

        if self.docs_flush_interval == 0 {
            errors.push("Docs flush interval cannot be 0".to_string());
        }

        if self.storage_backend == StorageBackendMode::Sqlite && !cfg!(feature = "sqlite") {
            errors.push(
                "The sqlite storage backend requires the 'sqlite' feature".to_string(),
            );
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Creates a configuration suitable for testing.
    ///
    /// Uses ephemeral port 0, the memory backend, and disables CORS and
    /// request ids.
    pub fn for_testing() -> Self {
        Self {
            port: 0, // Let OS assign port
            log_level: "debug".to_string(),
            request_timeout: 5, // Shorter timeout for tests
            enable_cors: false,
            base_url: "http://localhost".to_string(),
            enable_request_id: false,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.port, 8080);
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.storage_backend, StorageBackendMode::Memory);
        assert!(config.enable_cors);
        assert!(config.docs_dir.is_none());
        assert_eq!(config.docs_capacity, 1000);
    }

    #[test]
    fn test_socket_addr() {
        let config = ServerConfig {
            port: 3000,
            host: "0.0.0.0".to_string(),
            ..Default::default()
        };
        assert_eq!(config.socket_addr(), "0.0.0.0:3000");
    }

    #[test]
    fn test_base_url_trims_trailing_slash() {
        let config = ServerConfig {
            base_url: "https://brewery.example.com/".to_string(),
            ..Default::default()
        };
        assert_eq!(config.base_url(), "https://brewery.example.com");
    }

    #[test]
    fn test_validate_valid() {
        let config = ServerConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_reports_every_error() {
        let config = ServerConfig {
            port: 0,
            request_timeout: 0,
            base_url: "localhost:8080".to_string(),
            docs_capacity: 0,
            ..Default::default()
        };
        let errors = config.validate().unwrap_err();
        assert_eq!(errors.len(), 4);
        assert!(errors.iter().any(|e| e.contains("Port")));
        assert!(errors.iter().any(|e| e.contains("timeout")));
        assert!(errors.iter().any(|e| e.contains("Base URL")));
        assert!(errors.iter().any(|e| e.contains("Docs capacity")));
    }

    #[test]
    fn test_parse_from_args() {
        let config = ServerConfig::try_parse_from([
            "brewery",
            "--port",
            "9090",
            "--storage-backend",
            "sqlite",
            "--enable-cors",
            "false",
            "--docs-dir",
            "target/snippets",
            "--docs-capacity",
            "50",
        ])
        .unwrap();
        assert_eq!(config.port, 9090);
        assert_eq!(config.storage_backend, StorageBackendMode::Sqlite);
        assert!(!config.enable_cors);
        assert_eq!(config.docs_dir, Some(PathBuf::from("target/snippets")));
        assert_eq!(config.docs_capacity, 50);
        assert_eq!(config.docs_flush_interval, 30);
    }

    #[test]
    fn test_storage_backend_display() {
        assert_eq!(StorageBackendMode::Memory.to_string(), "memory");
        assert_eq!(StorageBackendMode::Sqlite.to_string(), "sqlite");
    }

    #[test]
    fn test_for_testing() {
        let config = ServerConfig::for_testing();
        assert_eq!(config.port, 0);
        assert!(!config.enable_cors);
        assert!(!config.enable_request_id);
        assert_eq!(config.base_url(), "http://localhost");
    }
}
