use crate::photo_source::{FetchError, PhotoSource};
use async_trait::async_trait;
use common_types::{PhotoId, PhotoRecord};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use url::Url;

#[must_use]
pub fn photo_json(id: u64, album_id: i64) -> Value {
    json!({
        "albumId": album_id,
        "id": id,
        "title": format!("photo {id}"),
        "url": format!("https://via.placeholder.com/600/{id}"),
        "thumbnailUrl": format!("https://via.placeholder.com/150/{id}")
    })
}

pub fn photo_id(id: u64) -> PhotoId {
    PhotoId::new(id).expect("test ids are non-zero")
}

/// In-memory catalog that counts how often it is asked for the full listing.
#[derive(Default)]
pub struct FakeSource {
    pub entries: Vec<Value>,
    pub catalog_delay: Option<Duration>,
    pub fail_catalog: bool,
    pub catalog_calls: AtomicUsize,
    pub photo_calls: AtomicUsize,
}

impl FakeSource {
    pub fn new(entries: Vec<Value>) -> Self {
        Self {
            entries,
            ..Self::default()
        }
    }

    pub fn catalog_calls(&self) -> usize {
        self.catalog_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PhotoSource for FakeSource {
    async fn fetch_catalog(&self) -> Result<Vec<Value>, FetchError> {
        self.catalog_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.catalog_delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail_catalog {
            let url: Url = "http://fake.invalid/photos".parse().expect("url");
            let source = serde_json::from_str::<Vec<Value>>("{").expect_err("invalid json");
            return Err(FetchError::Decode { url, source });
        }
        Ok(self.entries.clone())
    }

    async fn fetch_photo(&self, id: PhotoId) -> Result<Option<PhotoRecord>, FetchError> {
        self.photo_calls.fetch_add(1, Ordering::SeqCst);
        let record = self
            .entries
            .iter()
            .filter_map(|entry| serde_json::from_value::<PhotoRecord>(entry.clone()).ok())
            .find(|record| record.id == id);
        Ok(record)
    }
}
