//! Error types for release lookup and digest validation.
//!
//! Each variant provides a descriptive message identifying the invalid input
//! and the constraint that was violated.

use thiserror::Error;

/// Errors arising from invalid release-related values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArtefactError {
    /// No release descriptor exists for the requested platform key.
    #[error("unsupported platform {os}/{arch}; expected one of: {expected}")]
    UnsupportedPlatform {
        /// The operating-system identifier that was looked up.
        os: String,
        /// The architecture identifier that was looked up.
        arch: String,
        /// Comma-separated list of supported platform keys.
        expected: String,
    },

    /// A SHA-256 digest is not a valid 64-character hex string.
    #[error("invalid SHA-256 digest: {reason}")]
    InvalidSha256Digest {
        /// Description of the validation failure.
        reason: String,
    },
}

/// Result type alias using [`ArtefactError`].
pub type Result<T> = std::result::Result<T, ArtefactError>;
