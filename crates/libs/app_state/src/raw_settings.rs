use common_types::PopulationPolicy;
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Deserialize, Clone)]
pub struct RawSettings {
    pub logging: LoggingSettings,
    pub source: RawSourceSettings,
    #[serde(default)]
    pub catalog: CatalogSettings,
    pub generator: RawGeneratorSettings,
}

/// Logging configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingSettings {
    /// Default `EnvFilter` directive, used when `RUST_LOG` is not set.
    pub level: String,
}

/// Where the photo catalog is fetched from.
#[derive(Debug, Deserialize, Clone)]
pub struct RawSourceSettings {
    /// Base url of the JSON API, `/photos` is appended to it.
    pub base_url: String,
    /// Leave empty to wait on the remote source indefinitely.
    pub connect_timeout_secs: Option<u64>,
    pub request_timeout_secs: Option<u64>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct CatalogSettings {
    #[serde(default)]
    pub population: PopulationPolicy,
}

/// Configuration for writing the page data.
#[derive(Debug, Deserialize, Clone)]
pub struct RawGeneratorSettings {
    pub output_folder: PathBuf,
    /// How many detail pages are generated at the same time.
    pub concurrency: usize,
}
