use std::borrow::Cow;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use crate::cleaner::DeletionOutcome;

/// Most files a single scan reports. The rest are counted but dropped.
pub const MAX_RESULTS: usize = 1000;

/// One regular file found during a scan.
///
/// `size` is captured when the file is found and never refreshed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    path: PathBuf,
    size: u64,
}

impl FileEntry {
    pub fn new(path: PathBuf, size: u64) -> Self {
        Self { path, size }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Final path component, used as the display name.
    pub fn name(&self) -> Cow<'_, str> {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| self.path.to_string_lossy())
    }

    pub fn size(&self) -> u64 {
        self.size
    }
}

/// The files a scan found, largest first, at most [`MAX_RESULTS`] of them.
#[derive(Debug, Clone, Default)]
pub struct ScanResult {
    root: PathBuf,
    max_depth: usize,
    entries: Vec<FileEntry>,
    total_found: usize,
}

impl ScanResult {
    /// Sort `entries` by size (descending, ties by path) and cap them.
    pub fn from_entries(root: PathBuf, max_depth: usize, mut entries: Vec<FileEntry>) -> Self {
        let total_found = entries.len();
        entries.sort_by(|a, b| b.size.cmp(&a.size).then_with(|| a.path.cmp(&b.path)));
        entries.truncate(MAX_RESULTS);
        Self {
            root,
            max_depth,
            entries,
            total_found,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn entries(&self) -> &[FileEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of files the walk discovered before the cap was applied.
    pub fn total_found(&self) -> usize {
        self.total_found
    }

    pub fn is_truncated(&self) -> bool {
        self.total_found > self.entries.len()
    }

    pub fn total_bytes(&self) -> u64 {
        self.entries.iter().map(|e| e.size).sum()
    }

    pub fn get(&self, path: &Path) -> Option<&FileEntry> {
        self.entries.iter().find(|e| e.path == path)
    }

    /// Scan-time sizes for the selected paths that are part of this result.
    pub fn known_sizes(&self, selection: &HashSet<PathBuf>) -> HashMap<PathBuf, u64> {
        self.entries
            .iter()
            .filter(|e| selection.contains(&e.path))
            .map(|e| (e.path.clone(), e.size))
            .collect()
    }

    /// A copy of this result without the files `outcome` removed.
    /// Order is preserved, so the copy is still sorted.
    pub fn without_deleted(&self, outcome: &DeletionOutcome) -> ScanResult {
        let removed: HashSet<&Path> = outcome.deleted.iter().map(PathBuf::as_path).collect();
        let entries: Vec<FileEntry> = self
            .entries
            .iter()
            .filter(|e| !removed.contains(e.path.as_path()))
            .cloned()
            .collect();
        let dropped = self.entries.len() - entries.len();
        ScanResult {
            root: self.root.clone(),
            max_depth: self.max_depth,
            entries,
            total_found: self.total_found.saturating_sub(dropped),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(path: &str, size: u64) -> FileEntry {
        FileEntry::new(PathBuf::from(path), size)
    }

    #[test]
    fn name_is_last_component() {
        assert_eq!(entry("/home/u/docs/b.txt", 50).name(), "b.txt");
        assert_eq!(entry("/", 0).name(), "/");
    }

    #[test]
    fn from_entries_sorts_largest_first() {
        let result = ScanResult::from_entries(
            PathBuf::from("/r"),
            2,
            vec![entry("/r/a", 5), entry("/r/b", 500), entry("/r/c", 0), entry("/r/d", 50)],
        );
        let sizes: Vec<u64> = result.entries().iter().map(FileEntry::size).collect();
        assert_eq!(sizes, vec![500, 50, 5, 0]);
        assert_eq!(result.total_bytes(), 555);
        assert_eq!(result.max_depth(), 2);
        assert!(!result.is_truncated());
    }

    #[test]
    fn equal_sizes_order_by_path() {
        let result = ScanResult::from_entries(
            PathBuf::from("/r"),
            1,
            vec![entry("/r/z", 7), entry("/r/a", 7), entry("/r/m", 7)],
        );
        let names: Vec<String> = result.entries().iter().map(|e| e.name().into_owned()).collect();
        assert_eq!(names, vec!["a", "m", "z"]);
    }

    #[test]
    fn from_entries_caps_at_max_results() {
        let entries = (0..MAX_RESULTS as u64 + 250)
            .map(|i| FileEntry::new(PathBuf::from(format!("/r/f{i}")), i))
            .collect();
        let result = ScanResult::from_entries(PathBuf::from("/r"), 1, entries);
        assert_eq!(result.len(), MAX_RESULTS);
        assert_eq!(result.total_found(), MAX_RESULTS + 250);
        assert!(result.is_truncated());
        // the smallest files are the ones dropped
        assert_eq!(result.entries()[0].size(), MAX_RESULTS as u64 + 249);
        assert_eq!(result.entries()[MAX_RESULTS - 1].size(), 250);
    }

    #[test]
    fn known_sizes_only_covers_selected_entries() {
        let result = ScanResult::from_entries(
            PathBuf::from("/r"),
            1,
            vec![entry("/r/a", 10), entry("/r/b", 20)],
        );
        let selection: HashSet<PathBuf> = [PathBuf::from("/r/a"), PathBuf::from("/elsewhere")]
            .into_iter()
            .collect();
        let sizes = result.known_sizes(&selection);
        assert_eq!(sizes.len(), 1);
        assert_eq!(sizes[Path::new("/r/a")], 10);
    }

    #[test]
    fn without_deleted_keeps_order_and_leaves_original() {
        let result = ScanResult::from_entries(
            PathBuf::from("/r"),
            1,
            vec![entry("/r/a", 30), entry("/r/b", 20), entry("/r/c", 10)],
        );
        let outcome = DeletionOutcome {
            bytes_freed: 20,
            deleted: vec![PathBuf::from("/r/b")],
            failed: Vec::new(),
        };
        let updated = result.without_deleted(&outcome);
        assert_eq!(updated.len(), 2);
        assert!(updated.get(Path::new("/r/b")).is_none());
        assert_eq!(updated.entries()[0].size(), 30);
        assert_eq!(updated.entries()[1].size(), 10);
        assert_eq!(result.len(), 3);
    }
}
