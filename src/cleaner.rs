use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

/// A selected path that could not be removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletionFailure {
    pub path: PathBuf,
    /// Final path component, as shown to the user.
    pub name: String,
    pub reason: String,
}

/// What one call to [`delete_all`] did.
#[derive(Debug, Clone, Default)]
pub struct DeletionOutcome {
    /// Sum of the scan-time sizes of the removed files.
    pub bytes_freed: u64,
    /// Removed paths, in the order they were processed.
    pub deleted: Vec<PathBuf>,
    /// Paths that are still there (or never were), in processing order.
    pub failed: Vec<DeletionFailure>,
}

impl DeletionOutcome {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn failed_names(&self) -> Vec<&str> {
        self.failed.iter().map(|f| f.name.as_str()).collect()
    }

    /// The single message to show when anything failed.
    pub fn failure_message(&self) -> Option<String> {
        if self.failed.is_empty() {
            return None;
        }
        Some(format!(
            "Failed to delete some files: {}. You might not have permission to delete these files.",
            self.failed_names().join(", ")
        ))
    }
}

/// Permanently remove every path in `selection`.
///
/// Only plain files are removed; a directory in the selection is reported
/// as a failure. A failure never stops the batch.
///
/// `bytes_freed` adds up `known_sizes` (0 for a path without one). Those
/// are the sizes recorded at scan time and are not checked again, so the
/// tally is stale if a file changed after the scan.
pub fn delete_all<'a>(
    selection: impl IntoIterator<Item = &'a PathBuf>,
    known_sizes: &HashMap<PathBuf, u64>,
) -> DeletionOutcome {
    let mut outcome = DeletionOutcome::default();

    for path in selection {
        match fs::remove_file(path) {
            Ok(()) => {
                outcome.bytes_freed += known_sizes.get(path).copied().unwrap_or(0);
                outcome.deleted.push(path.clone());
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "could not delete file");
                outcome.failed.push(DeletionFailure {
                    path: path.clone(),
                    name: display_name(path),
                    reason: e.to_string(),
                });
            }
        }
    }

    info!(
        deleted = outcome.deleted.len(),
        failed = outcome.failed.len(),
        bytes_freed = outcome.bytes_freed,
        "deletion batch finished"
    );
    outcome
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
