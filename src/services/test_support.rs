// src/services/test_support.rs
// DOCUMENTATION: In-memory collection source for tests
// PURPOSE: Serve fixture records with json-server semantics and record every call

use crate::errors::PhotosError;
use crate::models::Collection;
use crate::services::collection_client::{CollectionQuery, CollectionSource, FieldClause};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::HashSet;
use std::sync::Mutex;
use std::time::Duration;

/// Fixture records for the three collections
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub photos: Vec<Value>,
    pub albums: Vec<Value>,
    pub users: Vec<Value>,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user(mut self, id: u64, email: &str) -> Self {
        self.users.push(json!({
            "id": id,
            "name": format!("User {}", id),
            "username": format!("user{}", id),
            "email": email,
            "phone": "1-770-736-8031",
            "website": "hildegard.org",
            "company": { "name": format!("Company {}", id) }
        }));
        self
    }

    pub fn album(mut self, id: u64, user_id: u64, title: &str) -> Self {
        self.albums.push(json!({ "id": id, "userId": user_id, "title": title }));
        self
    }

    pub fn photo(mut self, id: u64, album_id: u64, title: &str) -> Self {
        self.photos.push(json!({
            "id": id,
            "albumId": album_id,
            "title": title,
            "url": format!("https://via.placeholder.com/600/{}", id),
            "thumbnailUrl": format!("https://via.placeholder.com/150/{}", id)
        }));
        self
    }

    fn records(&self, collection: Collection) -> &[Value] {
        match collection {
            Collection::Photos => &self.photos,
            Collection::Albums => &self.albums,
            Collection::Users => &self.users,
        }
    }
}

/// Ready-made datasets
pub mod fixture {
    use super::Dataset;

    /// Two users, four albums, six photos
    pub fn small() -> Dataset {
        Dataset::new()
            .user(1, "a@example.com")
            .user(2, "x@example.com")
            .album(1, 1, "Vacation in Spain")
            .album(2, 2, "Vacation at home")
            .album(3, 2, "Work")
            .album(4, 1, "Family")
            .photo(1, 1, "accusamus beatae ad facilis")
            .photo(2, 2, "reprehenderit est deserunt")
            .photo(3, 3, "officia porro iure quia")
            .photo(4, 4, "culpa odio esse rerum")
            .photo(5, 1, "natus nisi omnis corporis")
            .photo(6, 2, "accusamus ea aliquid et")
    }

    /// Thirty photos over three albums, three of them titled with "Lorem"
    pub fn gallery() -> Dataset {
        let mut data = Dataset::new()
            .user(1, "a@example.com")
            .user(2, "b@example.com")
            .album(1, 1, "Summer")
            .album(2, 2, "Winter")
            .album(3, 1, "Spring");

        for id in 1..=30u64 {
            let title = match id {
                4 | 17 | 29 => format!("Lorem ipsum photo {}", id),
                _ => format!("dolor sit amet {}", id),
            };
            data = data.photo(id, (id % 3) + 1, &title);
        }

        data
    }
}

/// Call received by the fake
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedCall {
    Fetch(Collection, CollectionQuery),
    FetchOne(Collection, u64),
}

impl RecordedCall {
    pub fn collection(&self) -> Collection {
        match self {
            RecordedCall::Fetch(c, _) | RecordedCall::FetchOne(c, _) => *c,
        }
    }
}

/// Recording in-memory `CollectionSource`
pub struct FakeSource {
    data: Dataset,
    calls: Mutex<Vec<RecordedCall>>,
    failing: HashSet<Collection>,
    delay: Option<Duration>,
}

impl FakeSource {
    pub fn new(data: Dataset) -> Self {
        Self {
            data,
            calls: Mutex::new(Vec::new()),
            failing: HashSet::new(),
            delay: None,
        }
    }

    /// Make every call against `collection` fail
    pub fn failing_on(mut self, collection: Collection) -> Self {
        self.failing.insert(collection);
        self
    }

    /// Delay every answer
    pub fn with_delay_ms(mut self, millis: u64) -> Self {
        self.delay = Some(Duration::from_millis(millis));
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Queries sent to `collection` through `fetch`
    pub fn queries_to(&self, collection: Collection) -> Vec<CollectionQuery> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                RecordedCall::Fetch(c, query) if c == collection => Some(query),
                _ => None,
            })
            .collect()
    }

    pub fn calls_to(&self, collection: Collection) -> usize {
        self.calls()
            .iter()
            .filter(|call| call.collection() == collection)
            .count()
    }

    async fn answer(&self, call: RecordedCall) -> Result<(), PhotosError> {
        let collection = call.collection();
        self.calls.lock().unwrap().push(call);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        if self.failing.contains(&collection) {
            return Err(PhotosError::remote(collection, "", "API error 503 Service Unavailable"));
        }

        Ok(())
    }
}

fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn matches(record: &Value, clause: &FieldClause) -> bool {
    let field_value = |field: &str| record.get(field).map(render);

    match clause {
        FieldClause::Equals { field, value } => field_value(field.as_str()).as_deref() == Some(value.as_str()),
        FieldClause::AnyOf { field, values } => field_value(field.as_str())
            .map(|v| values.contains(&v))
            .unwrap_or(false),
        FieldClause::Contains { field, value } => field_value(field.as_str())
            .map(|v| v.contains(value.as_str()))
            .unwrap_or(false),
    }
}

#[async_trait]
impl CollectionSource for FakeSource {
    async fn fetch(
        &self,
        collection: Collection,
        query: &CollectionQuery,
    ) -> Result<Vec<Value>, PhotosError> {
        self.answer(RecordedCall::Fetch(collection, query.clone()))
            .await?;

        let filtered = self
            .data
            .records(collection)
            .iter()
            .filter(|record| query.clauses.iter().all(|clause| matches(record, clause)));

        let records = match query.page {
            Some(page) => filtered
                .skip(page.offset as usize)
                .take(page.limit as usize)
                .cloned()
                .collect(),
            None => filtered.cloned().collect(),
        };

        Ok(records)
    }

    async fn fetch_one(
        &self,
        collection: Collection,
        id: u64,
    ) -> Result<Option<Value>, PhotosError> {
        self.answer(RecordedCall::FetchOne(collection, id)).await?;

        Ok(self
            .data
            .records(collection)
            .iter()
            .find(|record| record.get("id").and_then(Value::as_u64) == Some(id))
            .cloned())
    }
}
