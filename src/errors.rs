// src/errors.rs
// DOCUMENTATION: Custom error types and HTTP responses
// PURPOSE: Centralized error handling for entire application

use crate::models::Collection;
use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde_json::json;
use thiserror::Error;

/// Message returned to clients for every upstream or join failure
pub const GENERIC_FETCH_FAILURE: &str = "Failed to fetch photo data";

/// Application-specific error types
/// DOCUMENTATION: Every failure a search or lookup can end with.
/// None of them is retried inside the service; a page either fully
/// enriches or the whole request fails.
#[derive(Error, Debug)]
pub enum PhotosError {
    /// Transport failure, non-success status or undecodable body
    #[error("Remote fetch from {collection} failed ({query}): {reason}")]
    RemoteFetch {
        collection: Collection,
        query: String,
        reason: String,
    },

    /// A photo references an album, or an album a user, that the batch did not return
    #[error("Enrichment consistency error: {0}")]
    EnrichmentConsistency(String),

    #[error("Photo not found with id: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The caller canceled the request (e.g. superseded by a newer search)
    #[error("Request canceled")]
    Canceled,
}

impl PhotosError {
    /// Build a remote fetch error for the given collection and rendered query
    pub fn remote(collection: Collection, query: impl Into<String>, reason: impl Into<String>) -> Self {
        PhotosError::RemoteFetch {
            collection,
            query: query.into(),
            reason: reason.into(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            PhotosError::RemoteFetch { .. } => "REMOTE_FETCH_ERROR",
            PhotosError::EnrichmentConsistency(_) => "ENRICHMENT_ERROR",
            PhotosError::NotFound(_) => "NOT_FOUND",
            PhotosError::InvalidInput(_) => "INVALID_INPUT",
            PhotosError::Canceled => "REQUEST_CANCELED",
        }
    }

    /// Message safe to expose to clients
    fn public_message(&self) -> String {
        match self {
            PhotosError::NotFound(_) | PhotosError::InvalidInput(_) => self.to_string(),
            _ => GENERIC_FETCH_FAILURE.to_string(),
        }
    }
}

/// Convert PhotosError to HTTP response
/// DOCUMENTATION: Maps error types to HTTP status codes and JSON responses.
/// Upstream and join faults are logged in full and answered generically.
impl ResponseError for PhotosError {
    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();

        if status.is_server_error() {
            log::error!("Request failed: {}", self);
        }

        let body = json!({
            "error": {
                "code": self.error_code(),
                "message": self.public_message(),
                "timestamp": chrono::Utc::now().to_rfc3339()
            }
        });

        HttpResponse::build(status).json(body)
    }

    fn status_code(&self) -> StatusCode {
        match self {
            PhotosError::RemoteFetch { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            PhotosError::EnrichmentConsistency(_) => StatusCode::INTERNAL_SERVER_ERROR,
            PhotosError::NotFound(_) => StatusCode::NOT_FOUND,
            PhotosError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            PhotosError::Canceled => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
