use super::scan::CatalogScan;
use common_types::PopulationPolicy;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::debug;

/// A shared, read-only snapshot of the catalog.
pub type Catalog = Arc<CatalogScan>;

/// Process-lifetime cache of the full catalog.
///
/// The cache is filled lazily and never refreshed. An empty catalog does not
/// count as filled, so the next caller fetches again. A failed fetch leaves the
/// cache untouched.
///
/// How concurrent callers that find the cache empty behave is decided by the
/// [`PopulationPolicy`]:
/// * [`PopulationPolicy::Coalesced`] lets one of them fetch while the others
///   wait on the fetch gate and then read its result.
/// * [`PopulationPolicy::Unguarded`] lets every one of them fetch and overwrite
///   the cache with its own result.
#[derive(Debug)]
pub struct CatalogCache {
    policy: PopulationPolicy,
    catalog: RwLock<Option<Catalog>>,
    fetch_gate: Mutex<()>,
}

impl CatalogCache {
    #[must_use]
    pub fn new(policy: PopulationPolicy) -> Self {
        Self {
            policy,
            catalog: RwLock::new(None),
            fetch_gate: Mutex::new(()),
        }
    }

    /// The cached catalog, if it has been filled.
    pub async fn get(&self) -> Option<Catalog> {
        self.catalog.read().await.clone()
    }

    /// Return the cached catalog, running `populate` to fill it if it is empty.
    pub async fn get_or_populate<F, Fut, E>(&self, populate: F) -> Result<Catalog, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<CatalogScan, E>>,
    {
        if let Some(catalog) = self.get().await {
            return Ok(catalog);
        }

        match self.policy {
            PopulationPolicy::Unguarded => Ok(self.store(populate().await?).await),
            PopulationPolicy::Coalesced => {
                let _gate = self.fetch_gate.lock().await;
                if let Some(catalog) = self.get().await {
                    debug!("Catalog was filled while waiting on another fetch.");
                    return Ok(catalog);
                }
                Ok(self.store(populate().await?).await)
            }
        }
    }

    async fn store(&self, scan: CatalogScan) -> Catalog {
        let catalog = Arc::new(scan);
        if catalog.is_empty() {
            debug!("Fetched catalog is empty, not caching it.");
        } else {
            *self.catalog.write().await = Some(Arc::clone(&catalog));
        }
        catalog
    }
}
