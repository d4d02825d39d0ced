//! Error types for the formatting-check wrapper.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while checking a file.
#[derive(Debug, Error)]
pub enum FmtError {
    /// The Terraform executable could not be started.
    #[error("failed to run {}: {source}", program.display())]
    Spawn {
        /// The executable that was invoked.
        program: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias using [`FmtError`].
pub type Result<T> = std::result::Result<T, FmtError>;
