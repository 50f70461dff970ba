//! Configuration management for the cadastro server.
//!
//! This module handles loading and validating configuration from environment variables.
//! A `.env` file is loaded first when present; nothing is printed to stdout, which MCP
//! uses for communication.

use crate::error::{ConfigError, ConfigResult};
use std::env;
use tracing_subscriber::EnvFilter;

/// Backend used when `OBRAS_API_BASE_URL` is not set.
pub const DEFAULT_API_URL: &str = "https://sistema-obras.onrender.com";

/// Configuration for the cadastro server.
#[derive(Debug, Clone)]
pub struct Config {
    /// Obras API base URL
    pub obras_api_url: String,

    /// HTTP request timeout in seconds (default: 10)
    pub request_timeout: u64,

    /// Log level (default: "error")
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Optional environment variables:
    /// - `OBRAS_API_BASE_URL`: Base URL for the Obras API (default: the hosted backend)
    /// - `REQUEST_TIMEOUT`: HTTP timeout in seconds (default: 10)
    /// - `LOG_LEVEL`: Logging level (default: "error")
    pub fn from_env() -> ConfigResult<Self> {
        let _ = dotenvy::dotenv();

        let obras_api_url =
            env::var("OBRAS_API_BASE_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        if !obras_api_url.starts_with("http://") && !obras_api_url.starts_with("https://") {
            return Err(ConfigError::InvalidValue {
                var: "OBRAS_API_BASE_URL".to_string(),
                reason: "Must start with http:// or https://".to_string(),
            });
        }

        let request_timeout = Self::parse_env_u64("REQUEST_TIMEOUT", 10)?;
        if request_timeout == 0 {
            return Err(ConfigError::InvalidValue {
                var: "REQUEST_TIMEOUT".to_string(),
                reason: "Must be greater than zero".to_string(),
            });
        }

        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "error".to_string());

        Ok(Config {
            obras_api_url,
            request_timeout,
            log_level,
        })
    }

    /// Log filter: `RUST_LOG` when set and valid, otherwise `log_level`, otherwise `error`.
    ///
    /// Call after [`Config::from_env`] so a `LOG_LEVEL` from `.env` is seen.
    pub fn log_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(&self.log_level))
            .unwrap_or_else(|_| EnvFilter::new("error"))
    }

    /// Parse an environment variable as u64 with a default value.
    fn parse_env_u64(var_name: &str, default: u64) -> ConfigResult<u64> {
        match env::var(var_name) {
            Ok(val) => val.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            obras_api_url: DEFAULT_API_URL.to_string(),
            request_timeout: 10,
            log_level: "error".to_string(),
        }
    }
}
