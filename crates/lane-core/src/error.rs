//! Error types for lane-core.

use std::path::PathBuf;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in lane-core operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid branch name.
    #[error("invalid branch name '{name}': {reason}")]
    InvalidBranchName {
        /// The invalid name.
        name: String,
        /// Why the name is invalid.
        reason: String,
    },

    /// Settings file parsing error.
    #[error("failed to parse {file}: {message}")]
    SettingsParse { file: PathBuf, message: String },

    /// No usable settings location on this platform.
    #[error("could not determine a settings directory for this platform")]
    NoSettingsDir,

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error.
    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),
}
