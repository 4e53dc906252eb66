use app_state::{load_app_settings_from, SETTINGS_PATH};
use clap::Parser;
use color_eyre::eyre::bail;
use color_eyre::Result;
use site_gen::context::SiteContext;
use site_gen::generate::generate_site;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser, Debug)]
#[command(version, about = "Generate listing and photo page data", long_about = None)]
struct Args {
    /// Settings file, overridable with `APP__` environment variables.
    #[clap(long, short, default_value = SETTINGS_PATH)]
    config: PathBuf,

    /// Write the pages here instead of `generator.output_folder`.
    #[clap(long, short)]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    let mut settings = load_app_settings_from(&args.config)?;
    if let Some(output) = args.output {
        settings.generator.output_folder = std::path::absolute(output)?;
    }

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| settings.logging.level.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Loaded settings from {}", args.config.display());
    info!(
        "🚀 Generating photo pages from {} ({} catalog population)",
        settings.source.base_url,
        settings.catalog.population.as_str()
    );
    let context = SiteContext::new(&settings)?;
    let report = generate_site(&context.service, &context.generator).await?;

    info!(
        "✅ Wrote {} photo pages to {}",
        report.written.len(),
        context.generator.output_folder.display()
    );
    if !report.failed.is_empty() {
        bail!("{} photo pages could not be generated", report.failed.len());
    }
    Ok(())
}
