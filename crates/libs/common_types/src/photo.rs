use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::{NonZeroU64, ParseIntError};
use std::str::FromStr;

/// Identifier of a photo in the remote catalog. Always greater than zero.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct PhotoId(NonZeroU64);

impl PhotoId {
    /// Returns `None` for `0`, which is never a valid photo id.
    #[must_use]
    pub const fn new(id: u64) -> Option<Self> {
        match NonZeroU64::new(id) {
            Some(id) => Some(Self(id)),
            None => None,
        }
    }

    #[must_use]
    pub const fn get(self) -> u64 {
        self.0.get()
    }
}

impl fmt::Display for PhotoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PhotoId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<NonZeroU64>().map(Self)
    }
}

/// A single photo as served by `GET /photos` and `GET /photos/{id}`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PhotoRecord {
    pub id: PhotoId,
    pub album_id: i64,
    pub title: String,
    pub url: String,
    pub thumbnail_url: String,
}

impl PhotoRecord {
    #[must_use]
    pub fn thumbnail(&self) -> ThumbnailRef {
        ThumbnailRef {
            id: self.id,
            url: self.thumbnail_url.clone(),
        }
    }

    #[must_use]
    pub fn summary(&self) -> PhotoSummary {
        PhotoSummary {
            id: self.id,
            title: self.title.clone(),
        }
    }
}

/// Sibling thumbnail rendered on a photo detail page.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ThumbnailRef {
    pub id: PhotoId,
    pub url: String,
}

/// Entry on the listing page.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct PhotoSummary {
    pub id: PhotoId,
    pub title: String,
}

/// A photo together with the thumbnails of every photo in its album,
/// the photo itself included.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct JoinResult {
    pub photo: PhotoRecord,
    pub thumbnails: Vec<ThumbnailRef>,
}
