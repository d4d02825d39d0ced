//! Executable extraction from release archives.
//!
//! Opens the verified archive in memory and returns the bytes of the first
//! entry that looks like the Terraform executable. Nothing is written to
//! disk here.

use super::release::TOOL_NAME;
use log::{debug, trace};
use std::io::{Cursor, Read};

/// Archive formats the extractor understands, selected from the URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveFormat {
    /// A `.zip` archive.
    Zip,
}

impl ArchiveFormat {
    /// Select the format from the download URL.
    ///
    /// # Examples
    ///
    /// ```
    /// use terraform_bin_installer::artefact::extraction::ArchiveFormat;
    ///
    /// assert_eq!(ArchiveFormat::from_url("https://x/terraform.zip"), Some(ArchiveFormat::Zip));
    /// assert_eq!(ArchiveFormat::from_url("https://x/terraform.tar.gz"), None);
    /// ```
    #[must_use]
    pub fn from_url(url: &str) -> Option<Self> {
        url.ends_with(".zip").then_some(Self::Zip)
    }
}

/// Trait for extracting the executable from an archive, enabling test mocking.
///
/// # Examples
///
/// ```
/// use terraform_bin_installer::artefact::extraction::ZipExtractor;
///
/// let extractor = ZipExtractor;
/// // Use extractor.extract_executable(url, &archive_bytes) in production
/// ```
#[cfg_attr(test, mockall::automock)]
pub trait ArtefactExtractor {
    /// Return the executable's bytes from `archive`, downloaded from `url`.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractionError::ExecutableNotFound`] if no entry matches or
    /// the URL names an unhandled format, and
    /// [`ExtractionError::InvalidArchive`] if the archive cannot be read.
    fn extract_executable(&self, url: &str, archive: &[u8]) -> Result<Vec<u8>, ExtractionError>;
}

/// Errors arising from executable extraction.
#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    /// The archive has no entry that looks like the executable.
    #[error("executable not found in archive from {url}")]
    ExecutableNotFound {
        /// The URL the archive was downloaded from.
        url: String,
    },

    /// The archive could not be parsed.
    #[error("invalid archive from {url}: {reason}")]
    InvalidArchive {
        /// The URL the archive was downloaded from.
        url: String,
        /// Description of the parse failure.
        reason: String,
    },

    /// I/O error while decompressing an entry.
    #[error("extraction I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Default extractor using the `zip` crate.
pub struct ZipExtractor;

impl ArtefactExtractor for ZipExtractor {
    fn extract_executable(&self, url: &str, archive: &[u8]) -> Result<Vec<u8>, ExtractionError> {
        match ArchiveFormat::from_url(url) {
            Some(ArchiveFormat::Zip) => extract_from_zip(url, archive),
            None => Err(ExtractionError::ExecutableNotFound {
                url: url.to_owned(),
            }),
        }
    }
}

/// Whether an archive entry name looks like the executable.
///
/// When several entries qualify, the first in archive order wins.
fn is_executable_entry(name: &str) -> bool {
    name.ends_with(".exe") || name.ends_with(TOOL_NAME)
}

fn extract_from_zip(url: &str, archive: &[u8]) -> Result<Vec<u8>, ExtractionError> {
    let invalid = |e: zip::result::ZipError| ExtractionError::InvalidArchive {
        url: url.to_owned(),
        reason: e.to_string(),
    };

    let mut zip = zip::ZipArchive::new(Cursor::new(archive)).map_err(invalid)?;
    for index in 0..zip.len() {
        let mut entry = zip.by_index(index).map_err(invalid)?;
        trace!("archive entry: {}", entry.name());
        if entry.is_dir() || !is_executable_entry(entry.name()) {
            continue;
        }

        debug!("extracting {} ({} bytes)", entry.name(), entry.size());
        let mut data = Vec::new();
        entry.read_to_end(&mut data)?;
        return Ok(data);
    }

    Err(ExtractionError::ExecutableNotFound {
        url: url.to_owned(),
    })
}
