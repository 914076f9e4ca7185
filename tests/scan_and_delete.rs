use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use tidyscan::{delete_all, scan, scan_dir, ScanError, ScanOptions, ScanSession};

fn write(root: &Path, rel: &str, size: usize) -> PathBuf {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, vec![b'z'; size]).unwrap();
    path
}

/// root/a.txt (100), root/docs/b.txt (50), root/.cache/c.txt (9999)
fn home_like_tree() -> TempDir {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "a.txt", 100);
    write(tmp.path(), "docs/b.txt", 50);
    write(tmp.path(), ".cache/c.txt", 9999);
    tmp
}

#[test]
fn worked_example_at_depth_one() {
    let tmp = home_like_tree();
    let result = scan(tmp.path().to_str().unwrap(), 1).unwrap();

    let listed: Vec<(PathBuf, u64)> = result
        .entries()
        .iter()
        .map(|e| (e.path().to_path_buf(), e.size()))
        .collect();
    assert_eq!(
        listed,
        vec![
            (tmp.path().join("a.txt"), 100),
            (tmp.path().join("docs/b.txt"), 50),
        ]
    );
    assert_eq!(result.entries()[1].name(), "b.txt");
}

#[test]
fn scan_missing_root_gives_no_result() {
    let tmp = TempDir::new().unwrap();
    let missing = tmp.path().join("gone");
    match scan(missing.to_str().unwrap(), 3) {
        Err(ScanError::RootNotFound(path)) => assert_eq!(path, missing),
        Ok(result) => panic!("unexpected result with {} entries", result.len()),
    }
}

#[test]
fn select_delete_and_update_the_list() {
    let tmp = home_like_tree();
    let result = scan_dir(tmp.path(), &ScanOptions::with_depth(3)).unwrap();
    assert_eq!(result.len(), 2);

    let a = tmp.path().join("a.txt");
    let selection: HashSet<PathBuf> = [a.clone()].into_iter().collect();
    let outcome = delete_all(&selection, &result.known_sizes(&selection));

    assert!(outcome.is_clean());
    assert_eq!(outcome.bytes_freed, 100);
    assert!(!a.exists());

    let updated = result.without_deleted(&outcome);
    assert_eq!(updated.len(), 1);
    assert_eq!(updated.entries()[0].path(), tmp.path().join("docs/b.txt"));

    // a rescan agrees with the updated list
    let rescan = scan_dir(tmp.path(), &ScanOptions::with_depth(3)).unwrap();
    assert_eq!(rescan.entries(), updated.entries());
}

#[test]
fn partial_failure_keeps_successes() {
    let tmp = home_like_tree();
    let result = scan_dir(tmp.path(), &ScanOptions::with_depth(3)).unwrap();

    let a = tmp.path().join("a.txt");
    let b = tmp.path().join("docs/b.txt");
    // b vanishes behind the scanner's back
    fs::remove_file(&b).unwrap();

    let selection: HashSet<PathBuf> = [a.clone(), b.clone()].into_iter().collect();
    let outcome = delete_all(&selection, &result.known_sizes(&selection));

    assert_eq!(outcome.bytes_freed, 100);
    assert_eq!(outcome.deleted, vec![a]);
    assert_eq!(outcome.failed_names(), vec!["b.txt"]);
    assert!(outcome
        .failure_message()
        .unwrap()
        .starts_with("Failed to delete some files: b.txt."));

    let updated = result.without_deleted(&outcome);
    assert_eq!(updated.len(), 1);
    assert_eq!(updated.entries()[0].path(), b);
}

#[test]
fn stale_selection_from_an_old_result_fails_gracefully() {
    let tmp = TempDir::new().unwrap();
    let old = write(tmp.path(), "old.bin", 30);
    let first = scan_dir(tmp.path(), &ScanOptions::with_depth(1)).unwrap();
    let selection: HashSet<PathBuf> = [old.clone()].into_iter().collect();

    fs::remove_file(&old).unwrap();
    write(tmp.path(), "new.bin", 40);
    let second = scan_dir(tmp.path(), &ScanOptions::with_depth(1)).unwrap();
    assert!(second.get(&old).is_none());

    // sizes come from the result the selection was drawn from
    let outcome = delete_all(&selection, &first.known_sizes(&selection));
    assert_eq!(outcome.bytes_freed, 0);
    assert_eq!(outcome.failed_names(), vec!["old.bin"]);
    assert_eq!(second.without_deleted(&outcome).len(), 1);
}

#[test]
fn background_scan_hands_over_the_final_list() {
    let tmp = home_like_tree();
    let mut session = ScanSession::new();
    session.start(
        tmp.path().to_string_lossy().into_owned(),
        ScanOptions::with_depth(0),
    );
    let result = session.wait().unwrap().unwrap();
    assert_eq!(result.len(), 1);
    assert_eq!(result.entries()[0].name(), "a.txt");
}
