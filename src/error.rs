//! Error types for a rename run.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failure that stops a run before any entry is touched.
#[derive(Error, Debug)]
pub enum RunError {
    /// The configured path is missing or not a directory
    #[error("Directory not found: {}", .0.display())]
    NotADirectory(PathBuf),

    /// The directory exists but could not be listed
    #[error("Failed to list {}: {source}", .path.display())]
    Listing {
        /// Directory being listed
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: io::Error,
    },
}

/// Failure confined to a single directory entry.
#[derive(Error, Debug)]
pub enum EntryError {
    /// IO error while inspecting the entry
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The transformed payload left nothing to name the file with
    #[error("payload is empty after name transforms")]
    EmptyName,

    /// The payload would name a path outside the directory
    #[error("payload '{0}' is not a plain file name")]
    InvalidName(String),

    /// Another file already holds the target name
    #[error("target '{}' already exists", .target.display())]
    TargetExists {
        /// Path that would have been overwritten
        target: PathBuf,
    },

    /// The filesystem refused the rename
    #[error("failed to rename '{}' to '{}': {source}", .from.display(), .to.display())]
    Rename {
        /// Source path
        from: PathBuf,
        /// Target path
        to: PathBuf,
        /// Underlying IO error
        #[source]
        source: io::Error,
    },
}

impl PartialEq for EntryError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (EntryError::Io(a), EntryError::Io(b)) => a.kind() == b.kind(),
            (EntryError::EmptyName, EntryError::EmptyName) => true,
            (EntryError::InvalidName(a), EntryError::InvalidName(b)) => a == b,
            (EntryError::TargetExists { target: a }, EntryError::TargetExists { target: b }) => {
                a == b
            }
            (
                EntryError::Rename { from, to, source },
                EntryError::Rename {
                    from: other_from,
                    to: other_to,
                    source: other_source,
                },
            ) => from == other_from && to == other_to && source.kind() == other_source.kind(),
            _ => false,
        }
    }
}

impl Eq for EntryError {}

/// Result alias for run-level operations.
pub type Result<T> = std::result::Result<T, RunError>;
