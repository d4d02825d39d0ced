//! Release archive download.
//!
//! Provides a trait-based abstraction for fetching release archives into
//! memory, enabling dependency injection for testing. A download is a single
//! GET with no retry; any non-success status is terminal.

use log::debug;
use std::io::Read;
use std::time::Duration;

/// Trait for downloading release archives.
///
/// Abstractions allow tests to mock HTTP behaviour without network access.
///
/// # Examples
///
/// ```
/// use terraform_bin_installer::artefact::download::HttpDownloader;
///
/// let downloader = HttpDownloader::new(None);
/// // Use downloader.download(url) in production
/// ```
#[cfg_attr(test, mockall::automock)]
pub trait ArtefactDownloader {
    /// Download the complete resource at `url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the server answers with a
    /// non-success status, or the body cannot be read.
    fn download(&self, url: &str) -> Result<Vec<u8>, DownloadError>;
}

/// Errors arising from archive download operations.
#[derive(Debug, thiserror::Error)]
pub enum DownloadError {
    /// The server answered with a non-success status.
    #[error("HTTP failure for {url}. Code: {status}")]
    HttpStatus {
        /// The URL that was requested.
        url: String,
        /// The status code received.
        status: u16,
    },

    /// The request could not be completed.
    #[error("download failed for {url}: {reason}")]
    Transport {
        /// The URL that was requested.
        url: String,
        /// A human-readable description of the failure.
        reason: String,
    },

    /// I/O error reading the response body.
    #[error("I/O error reading response from {url}: {source}")]
    Io {
        /// The URL that was requested.
        url: String,
        /// The underlying error.
        source: std::io::Error,
    },
}

/// HTTP-based downloader using `ureq`.
pub struct HttpDownloader {
    agent: ureq::Agent,
}

impl HttpDownloader {
    /// Create a downloader.
    ///
    /// `timeout` applies to the whole request; `None` keeps the transport
    /// default.
    #[must_use]
    pub fn new(timeout: Option<Duration>) -> Self {
        let config = ureq::Agent::config_builder()
            .timeout_global(timeout)
            .build();
        Self {
            agent: ureq::Agent::new_with_config(config),
        }
    }
}

impl Default for HttpDownloader {
    fn default() -> Self {
        Self::new(None)
    }
}

impl ArtefactDownloader for HttpDownloader {
    fn download(&self, url: &str) -> Result<Vec<u8>, DownloadError> {
        debug!("GET {url}");
        let response = self
            .agent
            .get(url)
            .call()
            .map_err(|e| map_ureq_error(url, &e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DownloadError::HttpStatus {
                url: url.to_owned(),
                status: status.as_u16(),
            });
        }

        let mut body = response.into_body();
        let mut data = Vec::new();
        body.as_reader()
            .read_to_end(&mut data)
            .map_err(|source| DownloadError::Io {
                url: url.to_owned(),
                source,
            })?;
        debug!("received {} bytes from {url}", data.len());
        Ok(data)
    }
}

/// Map a ureq error to a [`DownloadError`].
fn map_ureq_error(url: &str, err: &ureq::Error) -> DownloadError {
    match err {
        ureq::Error::StatusCode(status) => DownloadError::HttpStatus {
            url: url.to_owned(),
            status: *status,
        },
        other => DownloadError::Transport {
            url: url.to_owned(),
            reason: other.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::not_found(404)]
    #[case::server_error(500)]
    #[case::forbidden(403)]
    fn map_ureq_error_keeps_status_code(#[case] status: u16) {
        let err = ureq::Error::StatusCode(status);
        let mapped = map_ureq_error("https://example.test/archive.zip", &err);
        assert!(
            matches!(mapped, DownloadError::HttpStatus { status: s, .. } if s == status),
            "unexpected mapping: {mapped:?}"
        );
    }

    #[test]
    fn map_ureq_error_maps_other_failures_to_transport() {
        let err = ureq::Error::ConnectionFailed;
        let mapped = map_ureq_error("https://example.test/archive.zip", &err);
        assert!(matches!(mapped, DownloadError::Transport { .. }));
    }

    #[test]
    fn http_status_message_names_url_and_code() {
        let err = DownloadError::HttpStatus {
            url: "https://example.test/a.zip".to_owned(),
            status: 404,
        };
        assert_eq!(
            err.to_string(),
            "HTTP failure for https://example.test/a.zip. Code: 404"
        );
    }
}
