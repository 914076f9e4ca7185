use std::path::PathBuf;

use anyhow::{anyhow, Result};

use tidyscan::cleaner;
use tidyscan::entry::{FileEntry, ScanResult};
use tidyscan::scanner;
use tidyscan::utils;

use crate::config::Settings;
use crate::output;

fn run_scan_once(settings: &Settings) -> Result<ScanResult> {
    let result = scanner::scan_with(&settings.root_input, &settings.scan_options())?;
    output::print_scan_header(&utils::display_path(result.root()), result.max_depth());
    Ok(result)
}

fn print_entries<'a>(entries: impl IntoIterator<Item = &'a FileEntry>) {
    for entry in entries {
        output::print_file_row(
            &entry.name(),
            &utils::format_size(entry.size()),
            &utils::display_path(entry.path()),
        );
    }
}

/// `tidyscan scan`: list the largest files, delete nothing.
pub fn run_scan(settings: &Settings, top: Option<usize>) -> Result<()> {
    output::print_banner();
    let result = run_scan_once(settings)?;

    let shown = top.unwrap_or(result.len()).min(result.len());
    print_entries(&result.entries()[..shown]);

    if result.is_truncated() || shown < result.len() {
        output::print_truncated(shown, result.total_found());
    }
    output::print_total(result.len(), &utils::format_size(result.total_bytes()));
    Ok(())
}

/// `tidyscan clean`: select every file at least `min_size` big and delete
/// them when `confirm` is set.
pub fn run_clean(settings: &Settings, min_size: &str, confirm: bool) -> Result<()> {
    let min_bytes = utils::parse_size(min_size).map_err(|e| anyhow!(e))?;

    output::print_banner();
    if !confirm {
        output::print_warning("No --confirm flag provided. Listing only.");
        println!();
    }

    let result = run_scan_once(settings)?;
    let selected: Vec<&FileEntry> = result
        .entries()
        .iter()
        .filter(|e| e.size() >= min_bytes)
        .collect();

    if selected.is_empty() {
        output::print_info(&format!(
            "No files of {} or more found.",
            utils::format_size(min_bytes)
        ));
        return Ok(());
    }

    let selected_bytes: u64 = selected.iter().map(|e| e.size()).sum();
    print_entries(selected.iter().copied());
    output::print_total(selected.len(), &utils::format_size(selected_bytes));

    if !confirm {
        output::print_dry_run_footer();
        return Ok(());
    }

    let paths: Vec<PathBuf> = selected.iter().map(|e| e.path().to_path_buf()).collect();
    let sizes = result.known_sizes(&paths.iter().cloned().collect());
    let outcome = cleaner::delete_all(&paths, &sizes);

    for path in &outcome.deleted {
        let size = sizes.get(path).copied().unwrap_or(0);
        output::print_deleted(&utils::display_path(path), &utils::format_size(size));
    }
    for failure in &outcome.failed {
        output::print_delete_error(&utils::display_path(&failure.path), &failure.reason);
    }
    println!();
    if let Some(message) = outcome.failure_message() {
        output::print_warning(&message);
    }
    output::print_clean_complete(&utils::format_size(outcome.bytes_freed));
    Ok(())
}
