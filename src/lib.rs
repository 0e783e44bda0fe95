// src/lib.rs
// DOCUMENTATION: Library root
// PURPOSE: Photo search and enrichment core, usable without the HTTP server

pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod services;

pub use errors::PhotosError;
pub use models::{EnrichedPhoto, FilterSet};
pub use services::{CollectionClient, CollectionSource, PhotoService, SearchSupersession};
