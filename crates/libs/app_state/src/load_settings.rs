use crate::{AppSettings, RawSettings};
use color_eyre::eyre::Result;
use config::builder::DefaultState;
use config::ConfigBuilder;
use std::path::Path;

pub const SETTINGS_PATH: &str = "config/settings.yaml";

/// Load the app settings from YAML + environment variables.
pub fn load_app_settings_from(path: &Path) -> Result<AppSettings> {
    // Load .env first so its values take part in the APP__ overrides.
    dotenv::from_path(".env").ok();
    let config_path = path.canonicalize()?;

    let builder = config::Config::builder()
        .add_source(config::File::from(config_path))
        .add_source(
            config::Environment::with_prefix("APP")
                .separator("__")
                .try_parsing(true),
        );

    build_settings(builder)
}

pub fn build_settings(builder: ConfigBuilder<DefaultState>) -> Result<AppSettings> {
    let raw_settings = builder.build()?.try_deserialize::<RawSettings>()?;
    raw_settings.try_into()
}
