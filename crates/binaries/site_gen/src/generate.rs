use app_state::GeneratorSettings;
use color_eyre::eyre::WrapErr;
use color_eyre::{Report, Result};
use common_services::catalog::{CatalogError, CatalogService};
use common_types::PhotoId;
use futures_util::{stream, StreamExt};
use serde::Serialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{error, info, warn};

pub const INDEX_FILE: &str = "index.json";
pub const PHOTO_FOLDER: &str = "photo";

#[derive(Debug, Default)]
pub struct GenerateReport {
    /// Pages written, in listing order.
    pub written: Vec<PhotoId>,
    /// Listed photos the single-photo endpoint does not know.
    pub not_found: Vec<PhotoId>,
    pub failed: Vec<(PhotoId, Report)>,
    /// Catalog entries left out of the listing.
    pub skipped_entries: usize,
}

enum PageOutcome {
    Written(PhotoId),
    NotFound(PhotoId),
    Failed(PhotoId, Report),
}

#[must_use]
pub fn photo_page_path(output_folder: &Path, id: PhotoId) -> PathBuf {
    output_folder.join(PHOTO_FOLDER).join(format!("{id}.json"))
}

/// Write the listing page and one detail page per listed photo.
///
/// Ids listed more than once get a single page. A listing that cannot be
/// fetched fails the whole run. A detail page that
/// fails only fails that page, it ends up in [`GenerateReport::failed`].
pub async fn generate_site(
    service: &CatalogService,
    settings: &GeneratorSettings,
) -> Result<GenerateReport> {
    let output_folder = &settings.output_folder;
    fs::create_dir_all(output_folder.join(PHOTO_FOLDER))
        .await
        .wrap_err_with(|| format!("Cannot create output folder {}", output_folder.display()))?;

    let catalog = service.catalog().await?;
    let summaries = service.list_summaries().await?;
    write_json(&output_folder.join(INDEX_FILE), &summaries).await?;
    info!("Wrote listing of {} photos.", summaries.len());

    let listed = service.list_identifiers().await?;
    let total = listed.len();
    let mut seen = HashSet::with_capacity(total);
    let ids: Vec<PhotoId> = listed.into_iter().filter(|id| seen.insert(*id)).collect();
    if ids.len() < total {
        warn!("Listing repeats {} photo ids, writing each page once.", total - ids.len());
    }
    let outcomes: Vec<PageOutcome> = stream::iter(ids)
        .map(|id| generate_page(service, output_folder, id))
        .buffered(settings.concurrency)
        .collect()
        .await;

    let mut report = GenerateReport {
        skipped_entries: catalog.skipped.len(),
        ..GenerateReport::default()
    };
    for outcome in outcomes {
        match outcome {
            PageOutcome::Written(id) => report.written.push(id),
            PageOutcome::NotFound(id) => report.not_found.push(id),
            PageOutcome::Failed(id, e) => report.failed.push((id, e)),
        }
    }

    info!(
        "Generated {} pages, {} not found, {} failed, {} catalog entries skipped.",
        report.written.len(),
        report.not_found.len(),
        report.failed.len(),
        report.skipped_entries
    );
    Ok(report)
}

async fn generate_page(service: &CatalogService, output_folder: &Path, id: PhotoId) -> PageOutcome {
    let join = match service.join_photo(id).await {
        Ok(join) => join,
        Err(CatalogError::NotFound(_)) => {
            warn!("Photo {id} is listed but could not be found, skipping its page.");
            return PageOutcome::NotFound(id);
        }
        Err(e) => {
            error!("Cannot generate page for photo {id}: {e}");
            return PageOutcome::Failed(id, e.into());
        }
    };

    match write_json(&photo_page_path(output_folder, id), &join).await {
        Ok(()) => PageOutcome::Written(id),
        Err(e) => {
            error!("Cannot write page for photo {id}: {e:?}");
            PageOutcome::Failed(id, e)
        }
    }
}

async fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_vec_pretty(value)?;
    fs::write(path, json)
        .await
        .wrap_err_with(|| format!("Cannot write {}", path.display()))
}
