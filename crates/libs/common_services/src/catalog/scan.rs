use common_types::PhotoRecord;
use serde_json::Value;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The entry was `null`.
    Missing,
    /// The entry was present but not a valid photo.
    Malformed(String),
}

/// A catalog entry that was left out, by its 0-based position in the listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedEntry {
    pub index: usize,
    pub reason: SkipReason,
}

/// The valid photos of a catalog listing, in listing order, and the entries that were skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogScan {
    pub records: Vec<PhotoRecord>,
    pub skipped: Vec<SkippedEntry>,
}

impl CatalogScan {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }
}

/// Keep every entry that is a valid photo. A bad entry is logged and skipped,
/// it never fails the whole listing.
#[must_use]
pub fn scan_catalog(entries: Vec<Value>) -> CatalogScan {
    let mut scan = CatalogScan {
        records: Vec::with_capacity(entries.len()),
        skipped: Vec::new(),
    };

    for (index, entry) in entries.into_iter().enumerate() {
        if entry.is_null() {
            warn!("Photo at index {index} is missing, skipping it.");
            scan.skipped.push(SkippedEntry {
                index,
                reason: SkipReason::Missing,
            });
            continue;
        }

        match serde_json::from_value::<PhotoRecord>(entry) {
            Ok(record) => scan.records.push(record),
            Err(e) => {
                warn!("Photo at index {index} is malformed, skipping it: {e}");
                scan.skipped.push(SkippedEntry {
                    index,
                    reason: SkipReason::Malformed(e.to_string()),
                });
            }
        }
    }

    scan
}
