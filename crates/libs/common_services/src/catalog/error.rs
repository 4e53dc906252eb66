use crate::photo_source::FetchError;
use common_types::PhotoId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Photo not found: {0}")]
    NotFound(PhotoId),

    #[error(transparent)]
    Fetch(#[from] FetchError),
}
