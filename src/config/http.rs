// src/config/http.rs
// DOCUMENTATION: Upstream HTTP client initialization
// PURPOSE: Build the pooled client shared by every request

use crate::config::Config;
use reqwest::Client;
use std::time::Duration;

/// Initialize the HTTP client used for the upstream collections
/// DOCUMENTATION: Called once during application startup in main.rs.
/// The per-call timeout lives here; a timed out call surfaces as a
/// remote fetch error and is never retried.
pub fn init_http_client(config: &Config) -> Result<Client, reqwest::Error> {
    log::info!(
        "Initializing upstream client: {} (timeout {}s)",
        config.upstream_base_url,
        config.upstream_timeout_secs
    );

    let client = Client::builder()
        // Whole-request timeout for every collection fetch
        .timeout(Duration::from_secs(config.upstream_timeout_secs))
        // Keep idle connections around for the next request (90 seconds)
        .pool_idle_timeout(Duration::from_secs(90))
        .user_agent(concat!("metaphoto-api/", env!("CARGO_PKG_VERSION")))
        .build()?;

    log::info!("Upstream client initialized successfully");
    Ok(client)
}
