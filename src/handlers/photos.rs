// src/handlers/photos.rs
// DOCUMENTATION: HTTP handlers for photo operations
// PURPOSE: Parse requests, call services, return responses

use crate::errors::PhotosError;
use crate::models::PhotoSearchQuery;
use crate::services::{CollectionClient, CollectionSource, PhotoService};
use actix_web::{web, HttpResponse, Responder};
use tokio_util::sync::CancellationToken;
use validator::Validate;

/// Request-scoped client over the shared source
/// DOCUMENTATION: Each request gets its own cancellation token; dropping the
/// handler future (client went away) abandons any pending upstream call.
fn request_client(source: web::Data<dyn CollectionSource>) -> CollectionClient {
    CollectionClient::new(source.into_inner(), CancellationToken::new())
}

/// GET /photos
/// Search photos by title, album title and album owner email
pub async fn search_photos(
    source: web::Data<dyn CollectionSource>,
    query: web::Query<PhotoSearchQuery>,
) -> Result<impl Responder, PhotosError> {
    // Validate request
    if let Err(e) = query.validate() {
        return Err(PhotosError::InvalidInput(e.to_string()));
    }

    let filters = query.into_inner().into_filter_set();
    log::debug!(
        "Photo search: title={:?} album_title={:?} email_filter={} limit={} offset={}",
        filters.title,
        filters.album_title,
        filters.user_email.is_some(),
        filters.limit,
        filters.offset
    );

    let photos = PhotoService::search_photos(&request_client(source), &filters).await?;
    Ok(HttpResponse::Ok().json(photos))
}

/// GET /photos/{id}
/// Retrieve one enriched photo
pub async fn get_photo(
    source: web::Data<dyn CollectionSource>,
    path: web::Path<u64>,
) -> Result<impl Responder, PhotosError> {
    let photo = PhotoService::get_photo(&request_client(source), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(photo))
}

/// Configuration for photo routes
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::QueryConfig::default()
            .error_handler(|err, _req| PhotosError::InvalidInput(err.to_string()).into()),
    )
    .service(
        web::scope("/photos")
            .route("", web::get().to(search_photos))
            .route("/{id}", web::get().to(get_photo)),
    );
}
