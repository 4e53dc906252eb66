use super::error::FetchError;
use super::source::PhotoSource;
use app_state::SourceSettings;
use async_trait::async_trait;
use common_types::{PhotoId, PhotoRecord};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;
use url::Url;

/// [`PhotoSource`] backed by a JSON API exposing `/photos` and `/photos/{id}`.
#[derive(Clone, Debug)]
pub struct HttpPhotoSource {
    http_client: Client,
    base_url: Url,
}

impl HttpPhotoSource {
    #[must_use]
    pub const fn new(http_client: Client, base_url: Url) -> Self {
        Self {
            http_client,
            base_url,
        }
    }

    /// Build a client with the configured timeouts. Without timeouts a hanging
    /// remote source hangs the caller.
    pub fn from_settings(settings: &SourceSettings) -> Result<Self, FetchError> {
        let mut builder = Client::builder();
        if let Some(timeout) = settings.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self::new(builder.build()?, settings.base_url.clone()))
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, FetchError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| FetchError::InvalidBaseUrl(self.base_url.clone()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get(&self, url: &Url) -> Result<Response, FetchError> {
        debug!("GET {url}");
        Ok(self.http_client.get(url.clone()).send().await?)
    }
}

async fn unexpected_status(url: Url, response: Response) -> FetchError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    FetchError::UnexpectedStatus { url, status, body }
}

async fn read_json<T: DeserializeOwned>(url: Url, response: Response) -> Result<T, FetchError> {
    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|source| FetchError::Decode { url, source })
}

/// The API answers unknown ids with an empty object, some proxies with `null`.
fn is_absent(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

#[async_trait]
impl PhotoSource for HttpPhotoSource {
    async fn fetch_catalog(&self) -> Result<Vec<Value>, FetchError> {
        let url = self.endpoint(&["photos"])?;
        let response = self.get(&url).await?;
        if !response.status().is_success() {
            return Err(unexpected_status(url, response).await);
        }

        read_json(url, response).await
    }

    async fn fetch_photo(&self, id: PhotoId) -> Result<Option<PhotoRecord>, FetchError> {
        let url = self.endpoint(&["photos", &id.to_string()])?;
        let response = self.get(&url).await?;
        match response.status() {
            StatusCode::NOT_FOUND => {
                debug!("Photo {id} does not exist at {url}");
                return Ok(None);
            }
            status if !status.is_success() => return Err(unexpected_status(url, response).await),
            _ => {}
        }

        let value: Value = read_json(url.clone(), response).await?;
        if is_absent(&value) {
            debug!("Photo {id} came back empty from {url}");
            return Ok(None);
        }
        serde_json::from_value(value)
            .map(Some)
            .map_err(|source| FetchError::Decode { url, source })
    }
}
