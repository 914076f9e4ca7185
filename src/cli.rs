use clap::{ArgAction, Parser, Subcommand};

use tidyscan::scanner::DEFAULT_DEPTH;

#[derive(Parser)]
#[command(
    name = "tidyscan",
    about = "Find the largest files under a folder and delete the ones you pick",
    version
)]
pub struct Cli {
    /// Folder to scan: absolute, ~/relative, or relative to home (default: home)
    #[arg(long, env = "TIDYSCAN_PATH", global = true)]
    pub path: Option<String>,

    /// How many levels of subfolders to descend into
    #[arg(long, env = "TIDYSCAN_DEPTH", default_value_t = DEFAULT_DEPTH, global = true)]
    pub depth: usize,

    /// Upper bound on scan worker threads (default: one per core)
    #[arg(long, env = "TIDYSCAN_JOBS", global = true)]
    pub jobs: Option<usize>,

    /// More log output on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Without a subcommand the desktop window opens.
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// List the largest files without deleting anything
    Scan {
        /// Only print the first N files
        #[arg(long)]
        top: Option<usize>,
    },

    /// Delete the large files a scan finds (requires --confirm to actually delete)
    Clean {
        /// Actually delete files. Without this flag, only lists them.
        #[arg(long)]
        confirm: bool,

        /// Only select files at least this big (e.g. "100MB", "1GB")
        #[arg(long, default_value = "100MB")]
        min_size: String,
    },
}
