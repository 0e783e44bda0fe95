// src/models/filter.rs
// DOCUMENTATION: Search filters, on the wire and after parsing
// PURPOSE: Map query parameters onto the flat filter set the resolver consumes

use serde::{Deserialize, Deserializer};
use std::str::FromStr;
use validator::Validate;

/// Default page size when `limit` is absent
pub const DEFAULT_LIMIT: u32 = 25;

/// Largest page size a caller may ask for
pub const MAX_LIMIT: u32 = 1000;

/// Flat filter set for a photo search
/// DOCUMENTATION: All text filters are optional; pagination applies to the
/// photos collection after filtering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSet {
    /// Substring match on photo title
    pub title: Option<String>,

    /// Substring match on album title
    pub album_title: Option<String>,

    /// Exact match on album owner email
    pub user_email: Option<String>,

    pub limit: u32,
    pub offset: u32,
}

impl Default for FilterSet {
    fn default() -> Self {
        Self {
            title: None,
            album_title: None,
            user_email: None,
            limit: DEFAULT_LIMIT,
            offset: 0,
        }
    }
}

/// Query parameters of GET /photos
/// DOCUMENTATION: Dotted parameter names follow the nesting of the
/// enriched photo (`album.title`, `album.user.email`).
#[derive(Debug, Default, Deserialize, Validate)]
pub struct PhotoSearchQuery {
    pub title: Option<String>,

    #[serde(rename = "album.title")]
    pub album_title: Option<String>,

    #[serde(rename = "album.user.email")]
    pub user_email: Option<String>,

    /// Results per page (1-1000, default 25)
    #[validate(range(min = 1, max = 1000))]
    #[serde(default, deserialize_with = "empty_as_none")]
    pub limit: Option<u32>,

    /// Number of photos to skip (default 0)
    #[serde(default, deserialize_with = "empty_as_none")]
    pub offset: Option<u32>,
}

impl PhotoSearchQuery {
    /// Convert to a filter set, treating empty strings as absent
    pub fn into_filter_set(self) -> FilterSet {
        FilterSet {
            title: non_empty(self.title),
            album_title: non_empty(self.album_title),
            user_email: non_empty(self.user_email),
            limit: self.limit.unwrap_or(DEFAULT_LIMIT),
            offset: self.offset.unwrap_or(0),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Parse a numeric parameter, an empty value counting as absent
fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(raw) if !raw.is_empty() => raw.parse().map(Some).map_err(serde::de::Error::custom),
        _ => Ok(None),
    }
}
