use crate::{CatalogSettings, LoggingSettings, RawSettings};
use color_eyre::eyre::{bail, eyre};
use color_eyre::{Report, Result};
use std::path::{absolute, PathBuf};
use std::time::Duration;
use url::Url;

#[derive(Debug, Clone)]
pub struct AppSettings {
    pub logging: LoggingSettings,
    pub source: SourceSettings,
    pub catalog: CatalogSettings,
    pub generator: GeneratorSettings,
}

#[derive(Debug, Clone)]
pub struct SourceSettings {
    pub base_url: Url,
    pub connect_timeout: Option<Duration>,
    pub request_timeout: Option<Duration>,
}

#[derive(Debug, Clone)]
pub struct GeneratorSettings {
    pub output_folder: PathBuf,
    pub concurrency: usize,
}

impl TryFrom<RawSettings> for AppSettings {
    type Error = Report;

    fn try_from(raw: RawSettings) -> Result<Self> {
        let base_url: Url = raw
            .source
            .base_url
            .parse()
            .map_err(|e| eyre!("Invalid source.base_url {:?}: {e}", raw.source.base_url))?;
        if base_url.cannot_be_a_base() {
            bail!("source.base_url {base_url} cannot be used as a base url");
        }

        if raw.generator.concurrency == 0 {
            bail!("generator.concurrency must be at least 1");
        }
        let output_folder = absolute(&raw.generator.output_folder)?;

        Ok(Self {
            logging: raw.logging,
            source: SourceSettings {
                base_url,
                connect_timeout: raw.source.connect_timeout_secs.map(Duration::from_secs),
                request_timeout: raw.source.request_timeout_secs.map(Duration::from_secs),
            },
            catalog: raw.catalog,
            generator: GeneratorSettings {
                output_folder,
                concurrency: raw.generator.concurrency,
            },
        })
    }
}
