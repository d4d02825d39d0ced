//! Error types for the Terraform installer.
//!
//! This module defines one error variant per pipeline stage so callers can
//! tell which stage aborted the install. Every error is fatal; none are
//! downgraded to warnings.

use crate::artefact::download::DownloadError;
use crate::artefact::error::ArtefactError;
use crate::artefact::extraction::ExtractionError;
use crate::artefact::verification::IntegrityError;
use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors that can occur during the installation process.
#[derive(Debug, Error)]
pub enum InstallerError {
    /// No release exists for the platform.
    ///
    /// Raised before any network I/O.
    #[error("unsupported platform {os}/{arch}; expected one of: {expected}")]
    UnsupportedPlatform {
        /// The operating-system identifier that was looked up.
        os: String,
        /// The architecture identifier that was looked up.
        arch: String,
        /// Comma-separated list of supported platform keys.
        expected: String,
    },

    /// A release table entry carries a malformed digest.
    #[error("malformed release table entry: {reason}")]
    InvalidReleaseTable {
        /// Description of the validation failure.
        reason: String,
    },

    /// The archive could not be downloaded.
    #[error(transparent)]
    DownloadFailed(#[from] DownloadError),

    /// The downloaded bytes did not match the expected digest.
    #[error(transparent)]
    IntegrityError(#[from] IntegrityError),

    /// The archive did not contain the executable.
    #[error("executable not found in archive from {url}")]
    ExecutableNotFound {
        /// The URL the archive was downloaded from.
        url: String,
    },

    /// The archive passed verification but could not be read.
    #[error("invalid archive from {url}: {reason}")]
    InvalidArchive {
        /// The URL the archive was downloaded from.
        url: String,
        /// Description of the parse failure.
        reason: String,
    },

    /// The build directory already exists; the fetch step is one-shot.
    #[error("destination {path} already exists; remove it or choose another build directory")]
    DestinationExists {
        /// The pre-existing directory.
        path: Utf8PathBuf,
    },

    /// No install directory was given and none could be derived.
    #[error("install directory unavailable: {reason}")]
    InstallDirUnavailable {
        /// Description of why the directory could not be determined.
        reason: String,
    },

    /// The configuration file could not be read or parsed.
    #[error("invalid configuration at {path}: {reason}")]
    Config {
        /// Path to the configuration file.
        path: Utf8PathBuf,
        /// Description of the failure.
        reason: String,
    },

    /// Writing installer output failed.
    #[error("failed to write output: {source}")]
    WriteFailed {
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// An I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ArtefactError> for InstallerError {
    fn from(err: ArtefactError) -> Self {
        match err {
            ArtefactError::UnsupportedPlatform { os, arch, expected } => {
                Self::UnsupportedPlatform { os, arch, expected }
            }
            ArtefactError::InvalidSha256Digest { reason } => Self::InvalidReleaseTable { reason },
        }
    }
}

impl From<ExtractionError> for InstallerError {
    fn from(err: ExtractionError) -> Self {
        match err {
            ExtractionError::ExecutableNotFound { url } => Self::ExecutableNotFound { url },
            ExtractionError::InvalidArchive { url, reason } => Self::InvalidArchive { url, reason },
            ExtractionError::Io(source) => Self::Io(source),
        }
    }
}

/// Result type alias using [`InstallerError`].
pub type Result<T> = std::result::Result<T, InstallerError>;
