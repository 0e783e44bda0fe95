// src/services/photo_service.rs
// DOCUMENTATION: Business logic for photos
// PURPOSE: Compose filter resolution, the primary query and enrichment

use crate::errors::PhotosError;
use crate::models::{Collection, EnrichedPhoto, FilterSet, Photo};
use crate::services::collection_client::CollectionClient;
use crate::services::enrichment::enrich_photos;
use crate::services::filter_resolver::{FilterResolver, PhotoQueryPlan};

pub struct PhotoService;

impl PhotoService {
    /// Search photos by filter set
    /// DOCUMENTATION: Resolves album/owner filters, fetches one page of photos
    /// and enriches it. A canceled client never yields results.
    pub async fn search_photos(
        client: &CollectionClient,
        filters: &FilterSet,
    ) -> Result<Vec<EnrichedPhoto>, PhotosError> {
        let plan = FilterResolver::new(client).resolve(filters).await?;

        let photos: Vec<Photo> = match plan {
            PhotoQueryPlan::NoMatches => return Ok(Vec::new()),
            PhotoQueryPlan::Fetch(query) => {
                client.fetch_by_filter(Collection::Photos, &query).await?
            }
        };

        let enriched = enrich_photos(client, &photos).await?;

        log::info!(
            "Photo search returned {} results (limit {}, offset {})",
            enriched.len(),
            filters.limit,
            filters.offset
        );

        Ok(enriched)
    }

    /// Get one photo by id
    pub async fn get_photo(client: &CollectionClient, id: u64) -> Result<EnrichedPhoto, PhotosError> {
        let photo: Photo = client
            .fetch_one(Collection::Photos, id)
            .await?
            .ok_or_else(|| PhotosError::NotFound(id.to_string()))?;

        enrich_photos(client, std::slice::from_ref(&photo))
            .await?
            .pop()
            .ok_or_else(|| {
                PhotosError::EnrichmentConsistency(format!("photo {} was lost during enrichment", id))
            })
    }
}
