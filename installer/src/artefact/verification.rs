//! Checksum verification of downloaded release archives.
//!
//! Verification runs on the in-memory bytes before anything is written to
//! disk or executed. A mismatch aborts the install; there is no fallback
//! source.

use super::sha256_digest::Sha256Digest;
use log::debug;

/// The downloaded bytes do not hash to the expected digest.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("sha256 mismatch, expected {expected}, got {actual}")]
pub struct IntegrityError {
    /// Digest recorded in the release table.
    pub expected: Sha256Digest,
    /// Digest of the bytes actually received.
    pub actual: Sha256Digest,
}

/// Verify that `data` hashes to `expected`.
///
/// Both digests are normalised to lowercase, so the comparison is
/// case-insensitive.
///
/// # Errors
///
/// Returns [`IntegrityError`] when the digests differ.
///
/// # Examples
///
/// ```
/// use terraform_bin_installer::artefact::sha256_digest::Sha256Digest;
/// use terraform_bin_installer::artefact::verification::verify_sha256;
///
/// let expected = Sha256Digest::compute(b"release");
/// assert!(verify_sha256(b"release", &expected).is_ok());
/// assert!(verify_sha256(b"tampered", &expected).is_err());
/// ```
pub fn verify_sha256(data: &[u8], expected: &Sha256Digest) -> Result<(), IntegrityError> {
    let actual = Sha256Digest::compute(data);
    if actual != *expected {
        return Err(IntegrityError {
            expected: expected.clone(),
            actual,
        });
    }
    debug!("sha256 verified: {actual}");
    Ok(())
}
