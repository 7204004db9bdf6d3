//! Error types for lane-git.
//!
//! Most git operations here deliberately do not return `Err`: external
//! process failures degrade to a [`crate::exec::CmdOutput`] carrying the exit
//! code and combined output, and callers classify that. Errors are reserved
//! for conditions where there is no process result to report.

use std::path::PathBuf;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while setting up git operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No `.git` directory at the path or any parent.
    #[error("not a git repository (or any parent up to mount point): {0}")]
    NotARepository(PathBuf),

    /// The working directory itself is missing.
    #[error("working directory does not exist: {0}")]
    MissingWorkdir(PathBuf),
}
