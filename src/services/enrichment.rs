// src/services/enrichment.rs
// DOCUMENTATION: Batched photo → album → user join
// PURPOSE: Denormalize a page of photos with two remote calls at most

use crate::errors::PhotosError;
use crate::models::{Album, Collection, EnrichedPhoto, Photo, User};
use crate::services::collection_client::CollectionClient;
use std::collections::{BTreeSet, HashMap};

/// Lookup tables built once per page
#[derive(Debug, Default)]
pub struct JoinTables {
    albums: HashMap<u64, Album>,
    users: HashMap<u64, User>,
}

impl JoinTables {
    pub fn new(albums: Vec<Album>, users: Vec<User>) -> Self {
        Self {
            albums: albums.into_iter().map(|album| (album.id, album)).collect(),
            users: users.into_iter().map(|user| (user.id, user)).collect(),
        }
    }

    /// Attach album and owner to one photo
    pub fn assemble(&self, photo: &Photo) -> Result<EnrichedPhoto, PhotosError> {
        let album = self.albums.get(&photo.album_id).ok_or_else(|| {
            PhotosError::EnrichmentConsistency(format!(
                "photo {} references album {} which was not returned",
                photo.id, photo.album_id
            ))
        })?;

        let user = self.users.get(&album.user_id).ok_or_else(|| {
            PhotosError::EnrichmentConsistency(format!(
                "album {} references user {} which was not returned",
                album.id, album.user_id
            ))
        })?;

        Ok(photo.enrich(album, user))
    }
}

/// Unique album ids referenced by a page of photos
pub fn referenced_album_ids(photos: &[Photo]) -> BTreeSet<u64> {
    photos.iter().map(|photo| photo.album_id).collect()
}

/// Unique owner ids of a batch of albums
pub fn referenced_user_ids(albums: &[Album]) -> BTreeSet<u64> {
    albums.iter().map(|album| album.user_id).collect()
}

/// Enrich a page of photos
/// DOCUMENTATION: One batch fetch for albums, then one for their owners.
/// Output has the same length and order as `photos`; any dangling reference
/// fails the whole page.
pub async fn enrich_photos(
    client: &CollectionClient,
    photos: &[Photo],
) -> Result<Vec<EnrichedPhoto>, PhotosError> {
    let albums: Vec<Album> = client
        .fetch_by_ids(Collection::Albums, &referenced_album_ids(photos))
        .await?;

    let users: Vec<User> = client
        .fetch_by_ids(Collection::Users, &referenced_user_ids(&albums))
        .await?;

    log::debug!(
        "Joining {} photos with {} albums and {} users",
        photos.len(),
        albums.len(),
        users.len()
    );

    let tables = JoinTables::new(albums, users);
    photos.iter().map(|photo| tables.assemble(photo)).collect()
}
