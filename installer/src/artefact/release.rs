//! The pinned Terraform release table.
//!
//! Every supported platform key maps to exactly one [`ReleaseDescriptor`]
//! naming the archive suffix and its expected SHA-256 digest. The table is
//! immutable; the Cygwin entry reuses the Windows descriptor instead of
//! special-casing the lookup.

use serde::Serialize;

use super::error::{ArtefactError, Result};
use super::platform::PlatformKey;
use super::sha256_digest::Sha256Digest;

/// The Terraform release this package installs.
pub const TERRAFORM_VERSION: &str = "1.4.6";

/// Packaging revision, bumped when the wrapper changes but Terraform does not.
pub const PACKAGE_REVISION: u32 = 1;

/// Host that distributes Terraform release archives.
pub const DEFAULT_BASE_URL: &str = "https://releases.hashicorp.com";

/// Name of the wrapped tool, used in URLs and archive entry matching.
pub const TOOL_NAME: &str = "terraform";

/// Archive suffix and expected digest for one platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReleaseDescriptor {
    suffix: &'static str,
    sha256: &'static str,
}

impl ReleaseDescriptor {
    const fn new(suffix: &'static str, sha256: &'static str) -> Self {
        Self { suffix, sha256 }
    }

    /// Return the archive-name suffix, e.g. `_linux_amd64.zip`.
    #[must_use]
    pub const fn suffix(&self) -> &'static str {
        self.suffix
    }

    /// Return the expected digest as written in the table.
    #[must_use]
    pub const fn sha256(&self) -> &'static str {
        self.sha256
    }

    /// Parse the expected digest.
    ///
    /// # Errors
    ///
    /// Returns [`ArtefactError::InvalidSha256Digest`] if the table entry is
    /// malformed.
    pub fn expected_digest(&self) -> Result<Sha256Digest> {
        Sha256Digest::try_from(self.sha256)
    }

    /// Return the archive file name for `version`.
    ///
    /// # Examples
    ///
    /// ```
    /// use terraform_bin_installer::artefact::platform::PlatformKey;
    /// use terraform_bin_installer::artefact::release::locate;
    ///
    /// let descriptor = locate(&PlatformKey::new("linux", "x86_64")).unwrap();
    /// assert_eq!(descriptor.archive_name("1.4.6"), "terraform_1.4.6_linux_amd64.zip");
    /// ```
    #[must_use]
    pub fn archive_name(&self, version: &str) -> String {
        format!("{TOOL_NAME}_{version}{}", self.suffix)
    }

    /// Whether the archive is a Windows build.
    #[must_use]
    pub fn is_windows(&self) -> bool {
        self.suffix.contains("windows")
    }
}

/// One row of the release table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReleaseEntry {
    /// Operating-system identifier.
    pub os: &'static str,
    /// Architecture identifier.
    pub arch: &'static str,
    /// Descriptor for this key.
    #[serde(flatten)]
    pub descriptor: ReleaseDescriptor,
}

const WINDOWS_AMD64: ReleaseDescriptor = ReleaseDescriptor::new(
    "_windows_amd64.zip",
    "f666aa1388f94c9b86ea01cb884ba53b9132d2cec3d9cac976ad93a2aba901d5",
);

/// The supported platforms for [`TERRAFORM_VERSION`].
pub const RELEASES: &[ReleaseEntry] = &[
    ReleaseEntry {
        os: "linux",
        arch: "aarch64",
        descriptor: ReleaseDescriptor::new(
            "_linux_arm64.zip",
            "b38f5db944ac4942f11ceea465a91e365b0636febd9998c110fbbe95d61c3b26",
        ),
    },
    ReleaseEntry {
        os: "linux",
        arch: "x86_64",
        descriptor: ReleaseDescriptor::new(
            "_linux_amd64.zip",
            "e079db1a8945e39b1f8ba4e513946b3ab9f32bd5a2bdf19b9b186d22c5a3d53b",
        ),
    },
    ReleaseEntry {
        os: "macos",
        arch: "x86_64",
        descriptor: ReleaseDescriptor::new(
            "_darwin_amd64.zip",
            "5d8332994b86411b049391d31ad1a0785dfb470db8b9c50617de28ddb5d1f25d",
        ),
    },
    ReleaseEntry {
        os: "macos",
        arch: "aarch64",
        descriptor: ReleaseDescriptor::new(
            "_darwin_arm64.zip",
            "30a2f87298ff9f299452119bd14afaa8d5b000c572f62fa64baf432e35d9dec1",
        ),
    },
    ReleaseEntry {
        os: "windows",
        arch: "x86_64",
        descriptor: WINDOWS_AMD64,
    },
    ReleaseEntry {
        os: "cygwin",
        arch: "x86_64",
        descriptor: WINDOWS_AMD64,
    },
];

/// Look up the descriptor for `key`.
///
/// # Errors
///
/// Returns [`ArtefactError::UnsupportedPlatform`] when no table entry matches.
pub fn locate(key: &PlatformKey) -> Result<&'static ReleaseDescriptor> {
    RELEASES
        .iter()
        .find(|entry| entry.os == key.os() && entry.arch == key.arch())
        .map(|entry| &entry.descriptor)
        .ok_or_else(|| ArtefactError::UnsupportedPlatform {
            os: key.os().to_owned(),
            arch: key.arch().to_owned(),
            expected: supported_keys(),
        })
}

/// Return every supported key as `os/arch`, comma separated.
#[must_use]
pub fn supported_keys() -> String {
    RELEASES
        .iter()
        .map(|entry| format!("{}/{}", entry.os, entry.arch))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Build the download URL for `descriptor`.
///
/// A trailing slash on `base_url` is ignored.
///
/// # Examples
///
/// ```
/// use terraform_bin_installer::artefact::platform::PlatformKey;
/// use terraform_bin_installer::artefact::release::{download_url, locate};
///
/// let descriptor = locate(&PlatformKey::new("macos", "aarch64")).unwrap();
/// assert_eq!(
///     download_url("https://releases.hashicorp.com/", "1.4.6", descriptor),
///     "https://releases.hashicorp.com/terraform/1.4.6/terraform_1.4.6_darwin_arm64.zip",
/// );
/// ```
#[must_use]
pub fn download_url(base_url: &str, version: &str, descriptor: &ReleaseDescriptor) -> String {
    format!(
        "{}/{TOOL_NAME}/{version}/{}",
        base_url.trim_end_matches('/'),
        descriptor.archive_name(version)
    )
}

/// Return the package version identifier, `<terraform version>.<revision>`.
#[must_use]
pub fn package_version() -> String {
    format!("{TERRAFORM_VERSION}.{PACKAGE_REVISION}")
}

/// A release resolved for one platform: where to fetch it and what to expect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRelease {
    /// The platform key the release was resolved for.
    pub platform: PlatformKey,
    /// Full download URL.
    pub url: String,
    /// Expected digest of the archive at `url`.
    pub expected: Sha256Digest,
    /// File name to install the executable under.
    pub executable_name: &'static str,
}

/// Resolve `key` against the release table and `base_url`.
///
/// The URL and digest come from the same descriptor, so they always agree.
///
/// # Errors
///
/// Returns [`ArtefactError::UnsupportedPlatform`] for unknown keys, or
/// [`ArtefactError::InvalidSha256Digest`] for a malformed table entry.
pub fn resolve(key: &PlatformKey, base_url: &str) -> Result<ResolvedRelease> {
    let descriptor = locate(key)?;
    Ok(ResolvedRelease {
        platform: key.clone(),
        url: download_url(base_url, TERRAFORM_VERSION, descriptor),
        expected: descriptor.expected_digest()?,
        executable_name: key.executable_name(),
    })
}
