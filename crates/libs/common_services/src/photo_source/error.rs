use reqwest::StatusCode;
use thiserror::Error;
use url::Url;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Unexpected status {status} from {url}: {body}")]
    UnexpectedStatus {
        url: Url,
        status: StatusCode,
        body: String,
    },

    #[error("Could not decode response from {url}: {source}")]
    Decode {
        url: Url,
        source: serde_json::Error,
    },

    #[error("Base url {0} cannot have path segments")]
    InvalidBaseUrl(Url),
}
