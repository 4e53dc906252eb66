use super::error::FetchError;
use async_trait::async_trait;
use common_types::{PhotoId, PhotoRecord};
use serde_json::Value;

/// Remote collaborator serving the photo catalog.
#[async_trait]
pub trait PhotoSource: Send + Sync {
    /// Fetch every entry of the catalog, unvalidated and in source order.
    /// Entries can be `null` or miss fields, see [`crate::catalog::scan_catalog`].
    async fn fetch_catalog(&self) -> Result<Vec<Value>, FetchError>;

    /// Fetch a single photo. `Ok(None)` means the source has no photo with this id.
    async fn fetch_photo(&self, id: PhotoId) -> Result<Option<PhotoRecord>, FetchError>;
}
