// src/models/photo.rs
// DOCUMENTATION: Photo records and their denormalized output shape
// PURPOSE: What the photos collection returns and what the API answers with

use serde::{Deserialize, Serialize};

use super::{Album, User};

/// Photo record from the upstream photos collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Photo {
    pub id: u64,
    pub album_id: u64,
    pub title: String,
    pub url: String,
    pub thumbnail_url: String,
}

/// Photo with its album and the album's owner attached
/// DOCUMENTATION: The only shape returned by the API. `album` and
/// `album.user` are always present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedPhoto {
    pub id: u64,
    pub title: String,
    pub url: String,
    pub thumbnail_url: String,
    pub album: EnrichedAlbum,
}

/// Album nested inside an enriched photo
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedAlbum {
    pub id: u64,
    pub title: String,
    pub user: User,
}

impl Photo {
    /// Attach an album and its owner
    pub fn enrich(&self, album: &Album, user: &User) -> EnrichedPhoto {
        EnrichedPhoto {
            id: self.id,
            title: self.title.clone(),
            url: self.url.clone(),
            thumbnail_url: self.thumbnail_url.clone(),
            album: EnrichedAlbum {
                id: album.id,
                title: album.title.clone(),
                user: user.clone(),
            },
        }
    }
}
