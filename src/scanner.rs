use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use rayon::prelude::*;
use tracing::{debug, info, trace, warn};
use walkdir::WalkDir;

use crate::entry::{FileEntry, ScanResult};
use crate::error::ScanError;
use crate::skip_rules::SkipRules;

/// Depth used when the caller does not pick one.
pub const DEFAULT_DEPTH: usize = 3;

/// Depths offered by the desktop picker. Any value works for the scanner.
pub const DEPTH_CHOICES: &[usize] = &[1, 2, 3, 5, 10];

/// How a scan walks the tree.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Depth 0 lists only the root's own files. Each extra level lets the
    /// walk list one more layer of subfolders.
    pub max_depth: usize,
    /// Worker ceiling for the parallel walk. `None` uses every core.
    pub jobs: Option<usize>,
    pub skip_rules: SkipRules,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self::with_depth(DEFAULT_DEPTH)
    }
}

impl ScanOptions {
    pub fn with_depth(max_depth: usize) -> Self {
        Self {
            max_depth,
            jobs: None,
            skip_rules: SkipRules::default(),
        }
    }
}

/// Turn what the user typed into a directory path.
///
/// Empty input means the home directory. A leading `/` is absolute, a
/// leading `~` or `~/` is relative to home, and anything else is also taken
/// relative to home. Returns `None` when home is needed but unknown.
pub fn resolve_root(input: &str, home: Option<&Path>) -> Option<PathBuf> {
    let input = input.trim();
    if input.starts_with('/') {
        return Some(PathBuf::from(input));
    }
    let home = home?;
    if input.is_empty() {
        return Some(home.to_path_buf());
    }
    let relative = input
        .strip_prefix("~/")
        .or_else(|| input.strip_prefix('~'))
        .unwrap_or(input);
    if relative.is_empty() {
        Some(home.to_path_buf())
    } else {
        Some(home.join(relative))
    }
}

/// Scan `root_input` with the default skip rules.
pub fn scan(root_input: &str, max_depth: usize) -> Result<ScanResult, ScanError> {
    scan_with(root_input, &ScanOptions::with_depth(max_depth))
}

/// Resolve `root_input` against the home directory, then scan it.
pub fn scan_with(root_input: &str, options: &ScanOptions) -> Result<ScanResult, ScanError> {
    let home = dirs::home_dir();
    let root = resolve_root(root_input, home.as_deref())
        .ok_or_else(|| ScanError::RootNotFound(PathBuf::from(root_input.trim())))?;
    scan_dir(&root, options)
}

/// Scan an already resolved directory.
///
/// Fails only when `root` is not an existing directory. Folders that cannot
/// be listed and files whose metadata cannot be read are left out.
pub fn scan_dir(root: &Path, options: &ScanOptions) -> Result<ScanResult, ScanError> {
    if !root.is_dir() {
        return Err(ScanError::RootNotFound(root.to_path_buf()));
    }

    info!(root = %root.display(), max_depth = options.max_depth, "scan started");
    let started = Instant::now();

    let entries = match build_pool(options.jobs) {
        Some(pool) => pool.install(|| walk(root, options)),
        None => walk(root, options),
    };

    let result = ScanResult::from_entries(root.to_path_buf(), options.max_depth, entries);
    info!(
        root = %root.display(),
        found = result.total_found(),
        kept = result.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "scan finished"
    );
    Ok(result)
}

fn build_pool(jobs: Option<usize>) -> Option<rayon::ThreadPool> {
    let jobs = jobs.filter(|&n| n > 0)?;
    match rayon::ThreadPoolBuilder::new().num_threads(jobs).build() {
        Ok(pool) => Some(pool),
        Err(e) => {
            warn!(jobs, error = %e, "could not build scan pool, using the global one");
            None
        }
    }
}

/// List the root, then walk each surviving subfolder on its own rayon task.
fn walk(root: &Path, options: &ScanOptions) -> Vec<FileEntry> {
    let listing = match fs::read_dir(root) {
        Ok(rd) => rd,
        Err(e) => {
            debug!(path = %root.display(), error = %e, "skipping unreadable directory");
            return Vec::new();
        }
    };

    let mut files = Vec::new();
    let mut subdirs = Vec::new();

    for entry in listing.filter_map(|e| e.ok()) {
        let file_type = match entry.file_type() {
            Ok(t) => t,
            Err(e) => {
                trace!(path = %entry.path().display(), error = %e, "skipping entry");
                continue;
            }
        };
        let path = entry.path();
        if file_type.is_dir() {
            if options.skip_rules.should_skip_dir(&path) {
                trace!(path = %path.display(), "skipping excluded directory");
            } else {
                subdirs.push(path);
            }
        } else if file_type.is_file() {
            match entry.metadata() {
                Ok(meta) => files.push(FileEntry::new(path, meta.len())),
                Err(e) => trace!(path = %path.display(), error = %e, "skipping file"),
            }
        }
    }

    if options.max_depth == 0 {
        return files;
    }

    let nested: Vec<FileEntry> = subdirs
        .par_iter()
        .flat_map_iter(|dir| walk_subtree(dir, options))
        .collect();
    files.extend(nested);
    files
}

/// Files under one top-level subfolder. That folder sits at depth 1, so its
/// walk may go `max_depth` levels further down.
fn walk_subtree(dir: &Path, options: &ScanOptions) -> Vec<FileEntry> {
    let rules = &options.skip_rules;
    WalkDir::new(dir)
        .follow_links(false)
        .min_depth(1)
        .max_depth(options.max_depth)
        .into_iter()
        .filter_entry(|e| !(e.file_type().is_dir() && rules.should_skip_dir(e.path())))
        .filter_map(|res| match res {
            Ok(entry) => Some(entry),
            Err(e) => {
                debug!(
                    path = %e.path().unwrap_or(dir).display(),
                    error = %e,
                    "skipping unreadable directory"
                );
                None
            }
        })
        .filter(|e| e.file_type().is_file())
        .filter_map(|e| match e.metadata() {
            Ok(meta) => Some(FileEntry::new(e.into_path(), meta.len())),
            Err(err) => {
                trace!(path = %e.path().display(), error = %err, "skipping file");
                None
            }
        })
        .collect()
}
