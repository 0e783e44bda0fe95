// src/services/filter_resolver.rs
// DOCUMENTATION: Cross-collection filter resolution
// PURPOSE: Turn a flat filter set into a query on the photos collection

use crate::errors::PhotosError;
use crate::models::{Album, Collection, FilterSet, User};
use crate::services::collection_client::{CollectionClient, CollectionQuery};
use std::collections::BTreeSet;

/// Album ids a photo query is limited to
/// DOCUMENTATION: `None` means unrestricted. `Some` of an empty set means no
/// photo can match, whatever the other filters say.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlbumRestriction(Option<BTreeSet<u64>>);

impl AlbumRestriction {
    pub fn unrestricted() -> Self {
        Self(None)
    }

    pub fn nothing() -> Self {
        Self(Some(BTreeSet::new()))
    }

    pub fn only(ids: BTreeSet<u64>) -> Self {
        Self(Some(ids))
    }

    /// Narrow by another album set: intersect when already restricted,
    /// adopt the set otherwise
    pub fn narrow(self, ids: BTreeSet<u64>) -> Self {
        match self.0 {
            Some(current) => Self(Some(current.intersection(&ids).copied().collect())),
            None => Self(Some(ids)),
        }
    }

    /// True when no photo can match
    pub fn is_empty(&self) -> bool {
        matches!(&self.0, Some(ids) if ids.is_empty())
    }

    pub fn album_ids(&self) -> Option<&BTreeSet<u64>> {
        self.0.as_ref()
    }
}

/// Outcome of the owner-email lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OwnerAlbums {
    /// No user has that email
    NoSuchUser,
    /// Albums owned by the (first) matching user
    Owned { user_id: u64, album_ids: BTreeSet<u64> },
}

impl OwnerAlbums {
    /// Apply to a restriction; an unknown owner overrides any previous outcome
    pub fn apply(self, restriction: AlbumRestriction) -> AlbumRestriction {
        match self {
            OwnerAlbums::NoSuchUser => AlbumRestriction::nothing(),
            OwnerAlbums::Owned { album_ids, .. } => restriction.narrow(album_ids),
        }
    }
}

/// What to do against the photos collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhotoQueryPlan {
    /// No photo can match; skip the remote call
    NoMatches,
    /// Issue this query
    Fetch(CollectionQuery),
}

/// Build the photos query for a filter set and a resolved restriction
pub fn build_photo_query(filters: &FilterSet, restriction: &AlbumRestriction) -> PhotoQueryPlan {
    if restriction.is_empty() {
        return PhotoQueryPlan::NoMatches;
    }

    let mut query = CollectionQuery::new();

    if let Some(title) = &filters.title {
        query = query.contains("title", title);
    }

    query = query.paginate(filters.limit, filters.offset);

    if let Some(album_ids) = restriction.album_ids() {
        query = query.any_of("albumId", album_ids);
    }

    PhotoQueryPlan::Fetch(query)
}

/// Resolves album-title and owner-email filters into a photos query
pub struct FilterResolver<'a> {
    client: &'a CollectionClient,
}

impl<'a> FilterResolver<'a> {
    pub fn new(client: &'a CollectionClient) -> Self {
        Self { client }
    }

    /// Resolve a filter set
    /// DOCUMENTATION: Album title is resolved before owner email so the owner's
    /// albums can be intersected with it. An album title that matches nothing
    /// ends resolution early.
    pub async fn resolve(&self, filters: &FilterSet) -> Result<PhotoQueryPlan, PhotosError> {
        let mut restriction = AlbumRestriction::unrestricted();

        if let Some(album_title) = &filters.album_title {
            restriction = AlbumRestriction::only(self.albums_titled(album_title).await?);

            if restriction.is_empty() {
                log::debug!("No album title contains {:?}", album_title);
                return Ok(PhotoQueryPlan::NoMatches);
            }
        }

        if let Some(email) = &filters.user_email {
            let owner = self.albums_owned_by(email).await?;
            if owner == OwnerAlbums::NoSuchUser {
                log::debug!("No user matches the email filter");
            }
            restriction = owner.apply(restriction);
        }

        Ok(build_photo_query(filters, &restriction))
    }

    /// Ids of albums whose title contains `title`
    async fn albums_titled(&self, title: &str) -> Result<BTreeSet<u64>, PhotosError> {
        let query = CollectionQuery::new().contains("title", title);
        let albums: Vec<Album> = self.client.fetch_by_filter(Collection::Albums, &query).await?;

        Ok(albums.into_iter().map(|album| album.id).collect())
    }

    /// Albums of the user with exactly this email
    /// DOCUMENTATION: Emails are assumed unique. When several users match,
    /// the first one returned is used.
    async fn albums_owned_by(&self, email: &str) -> Result<OwnerAlbums, PhotosError> {
        let query = CollectionQuery::new().equals("email", email);
        let users: Vec<User> = self.client.fetch_by_filter(Collection::Users, &query).await?;

        let user = match users.first() {
            Some(user) => user,
            None => return Ok(OwnerAlbums::NoSuchUser),
        };

        if users.len() > 1 {
            log::warn!(
                "{} users match the email filter; using user {}",
                users.len(),
                user.id
            );
        }

        let query = CollectionQuery::new().equals("userId", user.id);
        let albums: Vec<Album> = self.client.fetch_by_filter(Collection::Albums, &query).await?;

        Ok(OwnerAlbums::Owned {
            user_id: user.id,
            album_ids: albums.into_iter().map(|album| album.id).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::{fixture, Dataset, FakeSource};
    use std::sync::Arc;
    use tokio_util::sync::CancellationToken;

    fn ids(values: &[u64]) -> BTreeSet<u64> {
        values.iter().copied().collect()
    }

    async fn resolve(source: &Arc<FakeSource>, filters: &FilterSet) -> PhotoQueryPlan {
        let client = CollectionClient::new(source.clone(), CancellationToken::new());
        FilterResolver::new(&client).resolve(filters).await.unwrap()
    }

    fn restricted_albums(plan: &PhotoQueryPlan) -> Option<Vec<String>> {
        match plan {
            PhotoQueryPlan::Fetch(query) => query.any_of_values("albumId").map(|v| v.to_vec()),
            PhotoQueryPlan::NoMatches => panic!("expected a fetch plan"),
        }
    }

    #[test]
    fn test_restriction_narrowing() {
        let restriction = AlbumRestriction::only(ids(&[1, 2, 3])).narrow(ids(&[2, 3, 4]));
        assert_eq!(restriction.album_ids(), Some(&ids(&[2, 3])));

        let adopted = AlbumRestriction::unrestricted().narrow(ids(&[9, 12]));
        assert_eq!(adopted.album_ids(), Some(&ids(&[9, 12])));

        let disjoint = AlbumRestriction::only(ids(&[1])).narrow(ids(&[2]));
        assert!(disjoint.is_empty());
    }

    #[test]
    fn test_unknown_owner_overrides_album_title() {
        let restriction = OwnerAlbums::NoSuchUser.apply(AlbumRestriction::only(ids(&[5, 9])));
        assert!(restriction.is_empty());

        let restriction = OwnerAlbums::NoSuchUser.apply(AlbumRestriction::unrestricted());
        assert!(restriction.is_empty());
    }

    #[test]
    fn test_build_query_without_restriction() {
        let filters = FilterSet {
            title: Some("Lorem".to_string()),
            limit: 10,
            ..Default::default()
        };

        match build_photo_query(&filters, &AlbumRestriction::unrestricted()) {
            PhotoQueryPlan::Fetch(query) => {
                assert_eq!(query.to_string(), "title_like=Lorem&_limit=10&_start=0")
            }
            PhotoQueryPlan::NoMatches => panic!("expected a fetch plan"),
        }
    }

    #[test]
    fn test_build_query_with_empty_restriction_skips_fetch() {
        let plan = build_photo_query(&FilterSet::default(), &AlbumRestriction::nothing());
        assert_eq!(plan, PhotoQueryPlan::NoMatches);
    }

    #[tokio::test]
    async fn test_album_title_without_matches_stops_early() {
        let source = Arc::new(FakeSource::new(fixture::small()));
        let filters = FilterSet {
            album_title: Some("Nowhere".to_string()),
            user_email: Some("x@example.com".to_string()),
            ..Default::default()
        };

        assert_eq!(resolve(&source, &filters).await, PhotoQueryPlan::NoMatches);
        assert_eq!(source.calls_to(Collection::Users), 0);
        assert_eq!(source.calls_to(Collection::Photos), 0);
    }

    #[tokio::test]
    async fn test_unknown_email_yields_no_matches() {
        let source = Arc::new(FakeSource::new(fixture::small()));
        let filters = FilterSet {
            album_title: Some("Vacation".to_string()),
            user_email: Some("nobody@example.com".to_string()),
            ..Default::default()
        };

        assert_eq!(resolve(&source, &filters).await, PhotoQueryPlan::NoMatches);
        assert_eq!(source.calls_to(Collection::Photos), 0);
    }

    #[tokio::test]
    async fn test_title_and_email_intersect() {
        let data = Dataset::new()
            .user(7, "x@example.com")
            .album(1, 3, "Trip north")
            .album(2, 7, "Trip south")
            .album(3, 7, "Trip east")
            .album(4, 7, "Birthday");
        let source = Arc::new(FakeSource::new(data));
        let filters = FilterSet {
            album_title: Some("Trip".to_string()),
            user_email: Some("x@example.com".to_string()),
            ..Default::default()
        };

        let plan = resolve(&source, &filters).await;
        assert_eq!(restricted_albums(&plan), Some(vec!["2".to_string(), "3".to_string()]));
    }

    #[tokio::test]
    async fn test_email_alone_adopts_owned_albums() {
        let source = Arc::new(FakeSource::new(fixture::small()));
        let filters = FilterSet {
            user_email: Some("x@example.com".to_string()),
            ..Default::default()
        };

        let plan = resolve(&source, &filters).await;
        assert_eq!(restricted_albums(&plan), Some(vec!["2".to_string(), "3".to_string()]));
        assert_eq!(
            source.queries_to(Collection::Albums),
            vec![CollectionQuery::new().equals("userId", 2)]
        );
    }

    #[tokio::test]
    async fn test_email_of_user_without_albums_yields_no_matches() {
        let data = fixture::small().user(3, "empty@example.com");
        let source = Arc::new(FakeSource::new(data));
        let filters = FilterSet {
            user_email: Some("empty@example.com".to_string()),
            ..Default::default()
        };

        assert_eq!(resolve(&source, &filters).await, PhotoQueryPlan::NoMatches);
        assert_eq!(
            source.queries_to(Collection::Albums),
            vec![CollectionQuery::new().equals("userId", 3)]
        );
        assert_eq!(source.calls_to(Collection::Photos), 0);
    }

    #[tokio::test]
    async fn test_duplicate_email_uses_first_user() {
        // Emails are assumed unique upstream; with duplicates only the first user counts
        let data = Dataset::new()
            .user(1, "dup@example.com")
            .user(2, "dup@example.com")
            .album(10, 1, "First user's album")
            .album(20, 2, "Second user's album");
        let source = Arc::new(FakeSource::new(data));
        let filters = FilterSet {
            user_email: Some("dup@example.com".to_string()),
            ..Default::default()
        };

        let plan = resolve(&source, &filters).await;
        assert_eq!(restricted_albums(&plan), Some(vec!["10".to_string()]));
    }

    #[tokio::test]
    async fn test_no_album_filters_means_no_lookups() {
        let source = Arc::new(FakeSource::new(fixture::small()));
        let filters = FilterSet {
            title: Some("accusamus".to_string()),
            ..Default::default()
        };

        let plan = resolve(&source, &filters).await;
        assert_eq!(restricted_albums(&plan), None);
        assert_eq!(source.call_count(), 0);
    }
}
