// src/models/album.rs

use serde::{Deserialize, Serialize};

/// Album record from the upstream albums collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Album {
    pub id: u64,
    pub user_id: u64,
    pub title: String,
}
