//! Find the largest files under a folder and delete the ones you pick.
//!
//! [`scanner::scan`] walks a directory to a bounded depth and returns the
//! biggest files it found. [`cleaner::delete_all`] removes a selection of
//! them and reports what was freed and what could not be removed.
//! [`session::ScanSession`] runs scans off the interactive thread.

pub mod cleaner;
pub mod disk_info;
pub mod entry;
pub mod error;
pub mod scanner;
pub mod session;
pub mod skip_rules;
pub mod utils;

pub use cleaner::{delete_all, DeletionFailure, DeletionOutcome};
pub use entry::{FileEntry, ScanResult, MAX_RESULTS};
pub use error::ScanError;
pub use scanner::{resolve_root, scan, scan_dir, scan_with, ScanOptions, DEFAULT_DEPTH};
pub use session::ScanSession;
pub use skip_rules::{SkipRule, SkipRules};
