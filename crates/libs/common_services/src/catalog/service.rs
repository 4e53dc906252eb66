use super::cache::{Catalog, CatalogCache};
use super::error::CatalogError;
use super::scan::scan_catalog;
use crate::alert;
use crate::photo_source::{FetchError, PhotoSource};
use common_types::{JoinResult, PhotoId, PhotoRecord, PhotoSummary, PopulationPolicy, ThumbnailRef};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Joins single photos against the cached catalog to find their album siblings.
#[derive(Clone)]
pub struct CatalogService {
    source: Arc<dyn PhotoSource>,
    cache: Arc<CatalogCache>,
}

impl CatalogService {
    #[must_use]
    pub fn new(source: Arc<dyn PhotoSource>, policy: PopulationPolicy) -> Self {
        Self {
            source,
            cache: Arc::new(CatalogCache::new(policy)),
        }
    }

    /// The full catalog, fetched from the source the first time it is needed.
    pub async fn catalog(&self) -> Result<Catalog, FetchError> {
        self.cache
            .get_or_populate(move || async move {
                let entries = self.source.fetch_catalog().await?;
                let total = entries.len();
                let scan = scan_catalog(entries);
                if !scan.skipped.is_empty() {
                    warn!(
                        "Skipped {} of {total} catalog entries.",
                        scan.skipped.len()
                    );
                }
                info!("Fetched catalog with {} photos.", scan.len());
                Ok::<_, FetchError>(scan)
            })
            .await
    }

    /// Ids of every photo in the catalog, in catalog order. These are exactly the
    /// photos that get a detail page.
    pub async fn list_identifiers(&self) -> Result<Vec<PhotoId>, FetchError> {
        let catalog = self.catalog().await?;
        Ok(catalog.records.iter().map(|photo| photo.id).collect())
    }

    /// Id and title of every photo in the catalog, for the listing page.
    pub async fn list_summaries(&self) -> Result<Vec<PhotoSummary>, FetchError> {
        let catalog = self.catalog().await?;
        Ok(catalog.records.iter().map(PhotoRecord::summary).collect())
    }

    /// Fetch photo `id` and the thumbnails of every catalog photo in the same album.
    ///
    /// The photo itself comes from the single-photo endpoint and is not checked
    /// against the catalog.
    ///
    /// # Errors
    ///
    /// * [`CatalogError::NotFound`] if the source has no photo with this id.
    /// * [`CatalogError::Fetch`] if fetching the photo or the catalog fails.
    pub async fn join_photo(&self, id: PhotoId) -> Result<JoinResult, CatalogError> {
        let photo = self
            .source
            .fetch_photo(id)
            .await?
            .ok_or(CatalogError::NotFound(id))?;
        let catalog = self.catalog().await?;

        let thumbnails = album_thumbnails(&catalog.records, photo.album_id);
        if !thumbnails.iter().any(|thumb| thumb.id == id) {
            alert!(
                "Photo {id} is not part of album {} in the cached catalog.",
                photo.album_id
            );
        }
        debug!(
            "Photo {id} has {} thumbnails in album {}.",
            thumbnails.len(),
            photo.album_id
        );

        Ok(JoinResult { photo, thumbnails })
    }
}

/// Thumbnails of every photo in `album_id`, in catalog order.
#[must_use]
pub fn album_thumbnails(catalog: &[PhotoRecord], album_id: i64) -> Vec<ThumbnailRef> {
    catalog
        .iter()
        .filter(|photo| photo.album_id == album_id)
        .map(PhotoRecord::thumbnail)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::test_source::{photo_id, photo_json, FakeSource};
    use futures_util::future::join_all;
    use serde_json::Value;
    use std::sync::atomic::Ordering;
    use std::time::Duration;

    fn service(source: &Arc<FakeSource>, policy: PopulationPolicy) -> CatalogService {
        CatalogService::new(Arc::clone(source) as Arc<dyn PhotoSource>, policy)
    }

    fn albums_source() -> Arc<FakeSource> {
        Arc::new(FakeSource::new(vec![
            photo_json(1, 10),
            photo_json(2, 10),
            photo_json(3, 20),
        ]))
    }

    fn thumb_ids(join: &JoinResult) -> Vec<u64> {
        join.thumbnails.iter().map(|t| t.id.get()).collect()
    }

    #[tokio::test]
    async fn test_join_photo_returns_album_siblings() -> Result<(), CatalogError> {
        let source = albums_source();
        let service = service(&source, PopulationPolicy::Coalesced);

        let join = service.join_photo(photo_id(1)).await?;

        assert_eq!(join.photo.id, photo_id(1));
        assert_eq!(thumb_ids(&join), vec![1, 2]);
        assert_eq!(join.thumbnails[1].url, "https://via.placeholder.com/150/2");

        let other_album = service.join_photo(photo_id(3)).await?;
        assert_eq!(thumb_ids(&other_album), vec![3]);
        Ok(())
    }

    #[tokio::test]
    async fn test_join_photo_unknown_id_is_not_found() {
        let source = albums_source();
        let service = service(&source, PopulationPolicy::Coalesced);

        let result = service.join_photo(photo_id(99)).await;

        assert!(matches!(result, Err(CatalogError::NotFound(id)) if id == photo_id(99)));
        // Nothing to join, so the catalog is never fetched.
        assert_eq!(source.catalog_calls(), 0);
    }

    #[tokio::test]
    async fn test_join_photo_is_idempotent_with_warm_catalog() -> Result<(), CatalogError> {
        let source = albums_source();
        let service = service(&source, PopulationPolicy::Coalesced);

        let first = service.join_photo(photo_id(2)).await?;
        let second = service.join_photo(photo_id(2)).await?;

        assert_eq!(first, second);
        assert_eq!(source.catalog_calls(), 1);
        // The photo itself is fetched on every join.
        assert_eq!(source.photo_calls.load(Ordering::SeqCst), 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_list_identifiers_skips_missing_entries() -> Result<(), FetchError> {
        let source = Arc::new(FakeSource::new(vec![
            photo_json(5, 1),
            photo_json(6, 1),
            Value::Null,
        ]));
        let service = service(&source, PopulationPolicy::Coalesced);

        let ids = service.list_identifiers().await?;
        assert_eq!(ids, vec![photo_id(5), photo_id(6)]);

        let catalog = service.catalog().await?;
        assert_eq!(catalog.skipped.len(), 1);
        assert_eq!(catalog.skipped[0].index, 2);
        assert_eq!(source.catalog_calls(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_list_summaries_reuses_catalog() -> Result<(), FetchError> {
        let source = albums_source();
        let service = service(&source, PopulationPolicy::Coalesced);

        let ids = service.list_identifiers().await?;
        let summaries = service.list_summaries().await?;

        let summary_ids: Vec<PhotoId> = summaries.iter().map(|s| s.id).collect();
        assert_eq!(summary_ids, ids);
        assert_eq!(summaries[0].title, "photo 1");
        assert_eq!(source.catalog_calls(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_catalog_fetch_error_is_not_not_found() {
        let source = Arc::new(FakeSource {
            fail_catalog: true,
            ..FakeSource::new(vec![photo_json(1, 10)])
        });
        let service = service(&source, PopulationPolicy::Coalesced);

        let result = service.join_photo(photo_id(1)).await;
        assert!(matches!(result, Err(CatalogError::Fetch(_))), "{result:?}");
        assert!(service.list_identifiers().await.is_err());
        // Not retried within a call, but every call tries again.
        assert_eq!(source.catalog_calls(), 2);
    }

    #[tokio::test]
    async fn test_coalesced_population_fetches_once() -> Result<(), FetchError> {
        let source = Arc::new(FakeSource {
            catalog_delay: Some(Duration::from_millis(20)),
            ..FakeSource::new(vec![photo_json(1, 10), photo_json(2, 10)])
        });
        let service = service(&source, PopulationPolicy::Coalesced);

        let results = join_all((0..8).map(|_| service.list_identifiers())).await;

        for ids in results {
            assert_eq!(ids?, vec![photo_id(1), photo_id(2)]);
        }
        assert_eq!(source.catalog_calls(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_unguarded_population_fetches_per_caller() -> Result<(), FetchError> {
        let source = Arc::new(FakeSource {
            catalog_delay: Some(Duration::from_millis(20)),
            ..FakeSource::new(vec![photo_json(1, 10), photo_json(2, 10)])
        });
        let service = service(&source, PopulationPolicy::Unguarded);

        let results = join_all((0..8).map(|_| service.list_identifiers())).await;

        for ids in results {
            assert_eq!(ids?, vec![photo_id(1), photo_id(2)]);
        }
        assert_eq!(source.catalog_calls(), 8);

        // Once filled, later callers read the cache.
        service.list_identifiers().await?;
        assert_eq!(source.catalog_calls(), 8);
        Ok(())
    }

    #[test]
    fn test_album_thumbnails_keeps_catalog_order() {
        let catalog: Vec<PhotoRecord> = [(4, 1), (2, 2), (9, 1), (1, 1)]
            .into_iter()
            .map(|(id, album)| serde_json::from_value(photo_json(id, album)).expect("photo"))
            .collect();

        let ids: Vec<u64> = album_thumbnails(&catalog, 1)
            .iter()
            .map(|t| t.id.get())
            .collect();
        assert_eq!(ids, vec![4, 9, 1]);
        assert!(album_thumbnails(&catalog, 3).is_empty());
    }
}
