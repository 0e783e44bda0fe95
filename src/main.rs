// src/main.rs
// DOCUMENTATION: Application entry point
// PURPOSE: Initialize config, upstream client, and start HTTP server

use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use metaphoto_api::config::{self, Config};
use metaphoto_api::handlers;
use metaphoto_api::services::{CollectionSource, JsonPlaceholderClient};
use std::io;
use std::sync::Arc;

#[actix_web::main]
async fn main() -> io::Result<()> {
    // 1. Load environment variables
    dotenv().ok();

    // 2. Load configuration
    let config = Config::from_env();

    // 3. Initialize logging
    if std::env::var("RUST_LOG").is_err() {
        let log_level = if !config.log_level.is_empty() {
            &config.log_level
        } else {
            "info,actix_web=info"
        };
        std::env::set_var("RUST_LOG", log_level);
    }
    env_logger::init();

    if let Err(e) = config.validate() {
        log::error!("Configuration error: {}", e);
        std::process::exit(1);
    }

    log::info!("Starting metaphoto-api...");
    log::info!("Environment: {}", config.environment);
    log::info!(
        "Server Address: {}:{}",
        config.server_address,
        config.server_port
    );

    // 4. Initialize the upstream collection source
    let http_client = match config::init_http_client(&config) {
        Ok(client) => client,
        Err(e) => {
            log::error!("Failed to build upstream HTTP client: {}", e);
            std::process::exit(1);
        }
    };
    let source: Arc<dyn CollectionSource> = Arc::new(JsonPlaceholderClient::new(
        http_client,
        config.upstream_base_url.clone(),
    ));

    // 5. Start HTTP server
    let server_addr = format!("{}:{}", config.server_address, config.server_port);
    let config_clone = config.clone();

    HttpServer::new(move || {
        App::new()
            // Application state (collection source and config)
            .app_data(web::Data::from(source.clone()))
            .app_data(web::Data::new(config_clone.clone()))
            // Middleware
            .wrap(handlers::cors_headers())
            .wrap(Logger::default())
            .wrap(actix_web::middleware::Compress::default())
            // Routes
            .configure(handlers::health_config)
            .configure(handlers::photos_config)
            .default_service(web::route().to(handlers::not_found))
    })
    .bind(&server_addr)?
    .run()
    .await
}
