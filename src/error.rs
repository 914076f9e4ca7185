use std::path::PathBuf;

use thiserror::Error;

/// The one scan failure that reaches the caller. Everything that goes wrong
/// below the root (unreadable folders, files that vanish mid-walk) is
/// absorbed by the walk instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScanError {
    #[error("directory not found: {}", .0.display())]
    RootNotFound(PathBuf),
}

impl ScanError {
    /// Message shown to a person in the desktop window.
    pub fn user_message(&self) -> &'static str {
        match self {
            ScanError::RootNotFound(_) => {
                "The specified directory could not be found. Please check the path and try again."
            }
        }
    }
}
