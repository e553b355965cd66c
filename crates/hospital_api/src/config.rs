//! Server configuration.
//!
//! Every flag can also be supplied through its environment variable.
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `HOSPITAL_HOST` | 127.0.0.1 | Host to bind |
//! | `HOSPITAL_PORT` | 5000 | Port to listen on |
//! | `HOSPITAL_DATABASE` | db.sqlite | SQLite file path, or `:memory:` |
//! | `HOSPITAL_LOG_LEVEL` | debug/info by build mode | Log level |
//! | `HOSPITAL_LOG_DIR` | unset (stderr) | Absolute directory for rolling log files |
//! | `HOSPITAL_REQUEST_TIMEOUT` | 30 | Request timeout (seconds) |
//! | `HOSPITAL_MAX_BODY_SIZE` | 1048576 | Max request body (bytes) |
//! | `HOSPITAL_MAX_CONNECTIONS` | 8 | SQLite pool size (forced to 1 for `:memory:`) |

use clap::Parser;
use hospital_core::default_log_level;
use std::time::Duration;

/// Runtime configuration for the registry HTTP server.
#[derive(Debug, Clone, Parser)]
#[command(name = "hospital-server")]
#[command(about = "Hospital / department / doctor registry over HTTP")]
pub struct ServerConfig {
    /// Host address to bind to.
    #[arg(long, env = "HOSPITAL_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on.
    #[arg(short, long, env = "HOSPITAL_PORT", default_value = "5000")]
    pub port: u16,

    /// SQLite database path (`:memory:` for a throwaway store).
    #[arg(long, env = "HOSPITAL_DATABASE", default_value = "db.sqlite")]
    pub database: String,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, env = "HOSPITAL_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Absolute directory for rolling log files; stderr when unset.
    #[arg(long, env = "HOSPITAL_LOG_DIR")]
    pub log_dir: Option<String>,

    /// Request timeout in seconds.
    #[arg(long, env = "HOSPITAL_REQUEST_TIMEOUT", default_value = "30")]
    pub request_timeout: u64,

    /// Maximum request body size in bytes.
    #[arg(long, env = "HOSPITAL_MAX_BODY_SIZE", default_value = "1048576")]
    pub max_body_size: usize,

    /// Maximum pooled SQLite connections.
    #[arg(long, env = "HOSPITAL_MAX_CONNECTIONS", default_value = "8")]
    pub max_connections: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            database: "db.sqlite".to_string(),
            log_level: None,
            log_dir: None,
            request_timeout: 30,
            max_body_size: 1024 * 1024,
            max_connections: 8,
        }
    }
}

impl ServerConfig {
    /// In-memory configuration for tests.
    pub fn for_testing() -> Self {
        Self {
            database: ":memory:".to_string(),
            ..Self::default()
        }
    }

    /// Returns the socket address to bind to.
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Configured log level, or the build-mode default.
    pub fn effective_log_level(&self) -> &str {
        self.log_level.as_deref().unwrap_or(default_log_level())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }

    /// Validates the configuration and returns every problem found.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.port == 0 {
            errors.push("Port cannot be 0".to_string());
        }

        if self.database.trim().is_empty() {
            errors.push("Database path cannot be empty".to_string());
        }

        if self.request_timeout == 0 {
            errors.push("Request timeout cannot be 0".to_string());
        }

        if self.max_body_size == 0 {
            errors.push("Max body size cannot be 0".to_string());
        }

        if self.max_connections == 0 {
            errors.push("Max connections cannot be 0".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ServerConfig;
    use clap::Parser;
    use hospital_core::default_log_level;

    #[test]
    fn default_config_is_valid() {
        assert!(ServerConfig::default().validate().is_ok());
        assert_eq!(ServerConfig::default().socket_addr(), "127.0.0.1:5000");
    }

    #[test]
    fn validate_collects_all_errors() {
        let config = ServerConfig {
            port: 0,
            request_timeout: 0,
            max_body_size: 0,
            max_connections: 0,
            ..ServerConfig::default()
        };
        let errors = config.validate().unwrap_err();
        assert_eq!(errors.len(), 4);
    }

    #[test]
    fn unset_log_level_falls_back_to_build_mode_default() {
        let config = ServerConfig::default();
        assert!(config.log_level.is_none());
        assert_eq!(config.effective_log_level(), default_log_level());

        let owned = ServerConfig {
            log_level: Some(String::from("error")),
            ..ServerConfig::default()
        };
        let level: &str = owned.effective_log_level();
        assert_eq!(level, "error");
    }

    #[test]
    fn parses_command_line_flags() {
        let config = ServerConfig::try_parse_from([
            "hospital-server",
            "--port",
            "8081",
            "--database",
            ":memory:",
            "--log-level",
            "warn",
        ])
        .unwrap();
        assert_eq!(config.port, 8081);
        assert_eq!(config.database, ":memory:");
        assert_eq!(config.effective_log_level(), "warn");
    }
}
