// src/config/env.rs
// DOCUMENTATION: Environment variable management
// PURPOSE: Load and validate configuration from .env files

use dotenv::dotenv;
use std::env;

/// Application configuration loaded from environment variables
/// DOCUMENTATION: Centralizes all configuration in one struct
/// Load with Config::from_env() at application startup
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address (e.g., "127.0.0.1")
    pub server_address: String,

    /// Server listen port (default 3001)
    pub server_port: u16,

    /// Environment: development, staging, production
    pub environment: String,

    /// Log level: debug, info, warn, error
    pub log_level: String,

    /// Base URL of the photos/albums/users collections
    pub upstream_base_url: String,

    /// Timeout for a single upstream call, in seconds
    pub upstream_timeout_secs: u64,
}

impl Config {
    /// Load configuration from environment variables
    /// DOCUMENTATION: Reads from .env or process environment
    /// Called once at application startup
    pub fn from_env() -> Self {
        dotenv().ok();

        Config {
            server_address: env::var("SERVER_ADDRESS").unwrap_or_else(|_| "127.0.0.1".to_string()),

            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "3001".to_string())
                .parse()
                .unwrap_or(3001),

            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),

            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),

            upstream_base_url: env::var("UPSTREAM_BASE_URL")
                .unwrap_or_else(|_| "https://jsonplaceholder.typicode.com".to_string())
                .trim_end_matches('/')
                .to_string(),

            upstream_timeout_secs: env::var("UPSTREAM_TIMEOUT_SECS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .unwrap_or(10),
        }
    }

    /// Validate critical configuration
    /// DOCUMENTATION: Ensures application can start safely
    pub fn validate(&self) -> Result<(), String> {
        if self.upstream_base_url.is_empty() {
            return Err("UPSTREAM_BASE_URL is required".to_string());
        }

        if !self.upstream_base_url.starts_with("http://")
            && !self.upstream_base_url.starts_with("https://")
        {
            return Err(format!(
                "UPSTREAM_BASE_URL must be an http(s) URL, got {}",
                self.upstream_base_url
            ));
        }

        if self.upstream_timeout_secs == 0 {
            log::warn!("UPSTREAM_TIMEOUT_SECS is 0 - upstream calls will time out immediately");
        }

        Ok(())
    }
}
