use colored::Colorize;

pub fn print_banner() {
    println!(
        "{}",
        concat!("tidyscan - large file finder v", env!("CARGO_PKG_VERSION"))
            .bold()
            .cyan()
    );
    println!();
}

pub fn print_scan_header(root: &str, depth: usize) {
    println!(
        "{}",
        format!("=== {root} (depth {depth}) ===").bold().white()
    );
}

pub fn print_file_row(name: &str, size: &str, path: &str) {
    println!("  {:<40} {:>12}  {}", name, size.yellow(), path.dimmed());
}

pub fn print_total(count: usize, total: &str) {
    println!("  {} {}", format!("{count} files,").bold(), total.green());
    println!();
}

pub fn print_truncated(shown: usize, found: usize) {
    println!(
        "  {}",
        format!("Showing the largest {shown} of {found} files.").dimmed()
    );
}

pub fn print_warning(msg: &str) {
    println!("{} {}", "Warning:".red().bold(), msg.red());
}

pub fn print_info(msg: &str) {
    println!("{} {}", "Info:".cyan().bold(), msg);
}

pub fn print_dry_run_footer() {
    println!(
        "{}",
        "This was a dry run. Run `tidyscan clean --confirm` to delete."
            .yellow()
            .bold()
    );
}

pub fn print_clean_complete(freed: &str) {
    println!(
        "{} {}",
        "Cleaned!".green().bold(),
        format!("{freed} freed.").green()
    );
}

pub fn print_deleted(path: &str, size: &str) {
    println!("  {} {}  {}", "Deleted".red(), path.dimmed(), size.yellow());
}

pub fn print_delete_error(path: &str, err: &str) {
    println!("  {} {}: {}", "Failed".red().bold(), path.dimmed(), err.red());
}
