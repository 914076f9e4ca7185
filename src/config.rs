use tidyscan::scanner::ScanOptions;

use crate::cli::Cli;

/// Everything the window and the headless commands need to start a scan.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Raw root as the user typed it. Empty means home.
    pub root_input: String,
    pub max_depth: usize,
    pub jobs: Option<usize>,
}

impl Settings {
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            root_input: cli.path.clone().unwrap_or_default(),
            max_depth: cli.depth,
            jobs: cli.jobs.filter(|&n| n > 0),
        }
    }

    pub fn scan_options(&self) -> ScanOptions {
        self.scan_options_with_depth(self.max_depth)
    }

    pub fn scan_options_with_depth(&self, max_depth: usize) -> ScanOptions {
        ScanOptions {
            jobs: self.jobs,
            ..ScanOptions::with_depth(max_depth)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn defaults_scan_home_three_levels_deep() {
        let cli = Cli::try_parse_from(["tidyscan"]).unwrap();
        let settings = Settings::from_cli(&cli);
        assert_eq!(settings.root_input, "");
        assert_eq!(settings.max_depth, 3);
        assert_eq!(settings.jobs, None);
    }

    #[test]
    fn zero_jobs_means_automatic() {
        let cli = Cli::try_parse_from(["tidyscan", "--jobs", "0"]).unwrap();
        assert_eq!(Settings::from_cli(&cli).jobs, None);
    }

    #[test]
    fn options_carry_depth_and_jobs() {
        let cli = Cli::try_parse_from(["tidyscan", "--depth", "10", "--jobs", "2"]).unwrap();
        let options = Settings::from_cli(&cli).scan_options();
        assert_eq!(options.max_depth, 10);
        assert_eq!(options.jobs, Some(2));
    }
}
