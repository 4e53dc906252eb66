use app_state::{AppSettings, GeneratorSettings};
use color_eyre::Result;
use common_services::catalog::CatalogService;
use common_services::photo_source::HttpPhotoSource;
use std::sync::Arc;

pub struct SiteContext {
    pub service: CatalogService,
    pub generator: GeneratorSettings,
}

impl SiteContext {
    /// Creates a new instance of `SiteContext` talking to the configured photo source.
    ///
    /// # Errors
    ///
    /// This function will return an error if the HTTP client cannot be built.
    pub fn new(settings: &AppSettings) -> Result<Self> {
        let source = HttpPhotoSource::from_settings(&settings.source)?;
        Ok(Self {
            service: CatalogService::new(Arc::new(source), settings.catalog.population),
            generator: settings.generator.clone(),
        })
    }
}
