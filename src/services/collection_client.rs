// src/services/collection_client.rs
// DOCUMENTATION: Remote collection access
// PURPOSE: Filtered/paginated fetches against photos, albums and users,
// with the empty-id short-circuit and per-request cancellation

use crate::errors::PhotosError;
use crate::models::Collection;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::BTreeSet;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Fields whose values are kept out of logs and error messages
const REDACTED_FIELDS: &[&str] = &["email"];

/// Page window over a filtered collection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub limit: u32,
    pub offset: u32,
}

/// One condition of a collection query
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldClause {
    /// `field` equals `value`
    Equals { field: String, value: String },
    /// `field` equals any of `values` (OR)
    AnyOf { field: String, values: Vec<String> },
    /// `field` contains `value`, with whatever case rules the source applies
    Contains { field: String, value: String },
}

/// Query against a single collection
/// DOCUMENTATION: Clauses are ANDed together; the page applies after filtering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectionQuery {
    pub clauses: Vec<FieldClause>,
    pub page: Option<Page>,
}

impl CollectionQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn equals(mut self, field: &str, value: impl ToString) -> Self {
        self.clauses.push(FieldClause::Equals {
            field: field.to_string(),
            value: value.to_string(),
        });
        self
    }

    pub fn any_of<I, V>(mut self, field: &str, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: ToString,
    {
        self.clauses.push(FieldClause::AnyOf {
            field: field.to_string(),
            values: values.into_iter().map(|v| v.to_string()).collect(),
        });
        self
    }

    pub fn contains(mut self, field: &str, value: &str) -> Self {
        self.clauses.push(FieldClause::Contains {
            field: field.to_string(),
            value: value.to_string(),
        });
        self
    }

    pub fn paginate(mut self, limit: u32, offset: u32) -> Self {
        self.page = Some(Page { limit, offset });
        self
    }

    /// Ids selected by an `AnyOf` clause on `field`, if any
    pub fn any_of_values(&self, field: &str) -> Option<&[String]> {
        self.clauses.iter().find_map(|clause| match clause {
            FieldClause::AnyOf { field: f, values } if f == field => Some(values.as_slice()),
            _ => None,
        })
    }

    /// Render as ordered query-string pairs (json-server dialect)
    /// DOCUMENTATION: `Equals` → `field=value`, `AnyOf` → repeated `field=value`,
    /// `Contains` → `field_like=value`, page → `_limit` and `_start`.
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();

        for clause in &self.clauses {
            match clause {
                FieldClause::Equals { field, value } => pairs.push((field.clone(), value.clone())),
                FieldClause::AnyOf { field, values } => {
                    pairs.extend(values.iter().map(|v| (field.clone(), v.clone())))
                }
                FieldClause::Contains { field, value } => {
                    pairs.push((format!("{}_like", field), value.clone()))
                }
            }
        }

        if let Some(page) = self.page {
            pairs.push(("_limit".to_string(), page.limit.to_string()));
            pairs.push(("_start".to_string(), page.offset.to_string()));
        }

        pairs
    }
}

impl CollectionQuery {
    /// Rendering for logs and errors; personal values are masked
    pub fn redacted(&self) -> String {
        self.to_query_pairs()
            .into_iter()
            .map(|(k, v)| {
                if REDACTED_FIELDS.contains(&k.as_str()) {
                    format!("{}=<redacted>", k)
                } else {
                    format!("{}={}", k, v)
                }
            })
            .collect::<Vec<_>>()
            .join("&")
    }
}

impl fmt::Display for CollectionQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self
            .to_query_pairs()
            .into_iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect();
        f.write_str(&rendered.join("&"))
    }
}

/// Backing store of the three collections
/// DOCUMENTATION: Transport seam. Implementations return raw JSON records and
/// map every transport or status failure to `PhotosError::RemoteFetch`.
#[async_trait]
pub trait CollectionSource: Send + Sync {
    /// Records of `collection` matching `query`, in source order
    async fn fetch(
        &self,
        collection: Collection,
        query: &CollectionQuery,
    ) -> Result<Vec<Value>, PhotosError>;

    /// Single record by id; `None` when the source does not know it
    async fn fetch_one(&self, collection: Collection, id: u64)
        -> Result<Option<Value>, PhotosError>;
}

/// Request-scoped typed client over a `CollectionSource`
/// DOCUMENTATION: Owns the cancellation token of one request. Once the token
/// fires, no fetch started through this client contributes results.
#[derive(Clone)]
pub struct CollectionClient {
    source: Arc<dyn CollectionSource>,
    cancel: CancellationToken,
}

impl CollectionClient {
    pub fn new(source: Arc<dyn CollectionSource>, cancel: CancellationToken) -> Self {
        Self { source, cancel }
    }

    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.cancel
    }

    /// Fetch records of `collection` whose id is in `ids`
    /// DOCUMENTATION: An empty id set returns an empty list without calling
    /// the source.
    pub async fn fetch_by_ids<T: DeserializeOwned>(
        &self,
        collection: Collection,
        ids: &BTreeSet<u64>,
    ) -> Result<Vec<T>, PhotosError> {
        if ids.is_empty() {
            log::debug!("Skipping {} fetch for empty id set", collection);
            return Ok(Vec::new());
        }

        let query = CollectionQuery::new().any_of("id", ids);
        self.fetch_by_filter(collection, &query).await
    }

    /// Fetch records of `collection` matching `query`
    pub async fn fetch_by_filter<T: DeserializeOwned>(
        &self,
        collection: Collection,
        query: &CollectionQuery,
    ) -> Result<Vec<T>, PhotosError> {
        log::debug!("Fetching {}?{}", collection, query);

        let records = self
            .guarded(self.source.fetch(collection, query))
            .await?;

        records
            .into_iter()
            .map(|record| {
                serde_json::from_value(record).map_err(|e| {
                    PhotosError::remote(collection, query.redacted(), format!("Parse error: {}", e))
                })
            })
            .collect()
    }

    /// Fetch a single record by id
    pub async fn fetch_one<T: DeserializeOwned>(
        &self,
        collection: Collection,
        id: u64,
    ) -> Result<Option<T>, PhotosError> {
        log::debug!("Fetching {}/{}", collection, id);

        let record = self.guarded(self.source.fetch_one(collection, id)).await?;

        record
            .map(|value| {
                serde_json::from_value(value).map_err(|e| {
                    PhotosError::remote(collection, format!("id={}", id), format!("Parse error: {}", e))
                })
            })
            .transpose()
    }

    /// Race a source call against the request's cancellation token
    async fn guarded<F, R>(&self, fetch: F) -> Result<R, PhotosError>
    where
        F: Future<Output = Result<R, PhotosError>>,
    {
        if self.cancel.is_cancelled() {
            return Err(PhotosError::Canceled);
        }

        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => Err(PhotosError::Canceled),
            result = fetch => result,
        }
    }
}
