// src/services/jsonplaceholder_client.rs
// DOCUMENTATION: HTTP client for the upstream collections
// PURPOSE: Speak the json-server REST dialect (photos, albums, users)

use crate::errors::PhotosError;
use crate::models::Collection;
use crate::services::collection_client::{CollectionQuery, CollectionSource};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;

/// json-server backed collection source
/// DOCUMENTATION: One instance is shared by all requests; it holds no
/// per-request state, only the pooled HTTP client.
pub struct JsonPlaceholderClient {
    /// HTTP client for making requests
    client: Client,
    /// Base URL, e.g. https://jsonplaceholder.typicode.com
    base_url: String,
}

impl JsonPlaceholderClient {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL of a collection listing
    pub fn collection_url(&self, collection: Collection) -> String {
        format!("{}/{}", self.base_url, collection.path())
    }

    /// URL of a single record
    pub fn record_url(&self, collection: Collection, id: u64) -> String {
        format!("{}/{}/{}", self.base_url, collection.path(), id)
    }
}

#[async_trait]
impl CollectionSource for JsonPlaceholderClient {
    /// List records of a collection
    ///
    /// # Arguments
    /// * `collection` - Collection to query
    /// * `query` - Filter clauses and optional page window
    ///
    /// # Returns
    /// Raw records in the order the upstream returned them
    async fn fetch(
        &self,
        collection: Collection,
        query: &CollectionQuery,
    ) -> Result<Vec<Value>, PhotosError> {
        let url = self.collection_url(collection);
        let rendered = query.redacted();

        log::debug!("Upstream request: GET {}?{}", url, rendered);

        let response = self
            .client
            .get(&url)
            .query(&query.to_query_pairs())
            .send()
            .await
            .map_err(|e| {
                log::error!("Upstream {} request failed: {}", collection, e);
                PhotosError::remote(collection, rendered.clone(), format!("Request failed: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            log::error!("Upstream {} error {}: {}", collection, status, body);
            return Err(PhotosError::remote(
                collection,
                rendered,
                format!("API error {}", status),
            ));
        }

        let records: Vec<Value> = response.json().await.map_err(|e| {
            log::error!("Failed to parse upstream {} response: {}", collection, e);
            PhotosError::remote(collection, rendered.clone(), format!("Parse error: {}", e))
        })?;

        log::debug!("Upstream {} returned {} records", collection, records.len());
        Ok(records)
    }

    /// Get a single record by id
    /// DOCUMENTATION: A 404 from the upstream means the record does not exist
    async fn fetch_one(
        &self,
        collection: Collection,
        id: u64,
    ) -> Result<Option<Value>, PhotosError> {
        let url = self.record_url(collection, id);
        let rendered = format!("id={}", id);

        log::debug!("Upstream request: GET {}", url);

        let response = self.client.get(&url).send().await.map_err(|e| {
            log::error!("Upstream {} lookup failed: {}", collection, e);
            PhotosError::remote(collection, rendered.clone(), format!("Request failed: {}", e))
        })?;

        if response.status() == StatusCode::NOT_FOUND {
            log::debug!("Upstream {} has no record {}", collection, id);
            return Ok(None);
        }

        if !response.status().is_success() {
            let status = response.status();
            log::error!("Upstream {} lookup error {} for id {}", collection, status, id);
            return Err(PhotosError::remote(
                collection,
                rendered,
                format!("API error {}", status),
            ));
        }

        let record: Value = response
            .json()
            .await
            .map_err(|e| PhotosError::remote(collection, rendered.clone(), format!("Parse error: {}", e)))?;

        // json-server answers unknown ids with an empty object on some deployments
        if record.as_object().map(|o| o.is_empty()).unwrap_or(false) {
            return Ok(None);
        }

        Ok(Some(record))
    }
}
