// src/handlers/mod.rs
// DOCUMENTATION: Handlers module organization
// PURPOSE: Re-export handler components, shared middleware and fallback route

pub mod health;
pub mod photos;

pub use health::config as health_config;
pub use photos::config as photos_config;

use actix_web::{http::StatusCode, middleware::DefaultHeaders, HttpResponse};
use serde_json::json;

/// Headers added to every response (any origin may read the API)
pub fn cors_headers() -> DefaultHeaders {
    DefaultHeaders::new().add(("Access-Control-Allow-Origin", "*"))
}

/// Fallback for unknown routes
pub async fn not_found() -> HttpResponse {
    HttpResponse::build(StatusCode::NOT_FOUND).json(json!({
        "error": {
            "code": "NOT_FOUND",
            "message": "Not found",
            "timestamp": chrono::Utc::now().to_rfc3339()
        }
    }))
}
