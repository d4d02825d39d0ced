//! Platform keys used to select a release descriptor.
//!
//! A key pairs an operating-system identifier with a machine-architecture
//! identifier, both spelled the way `std::env::consts` reports them
//! (`linux`, `macos`, `windows`, `cygwin`; `x86_64`, `aarch64`).

use super::release::TOOL_NAME;
use std::fmt;

/// An (operating-system, architecture) lookup key.
///
/// # Examples
///
/// ```
/// use terraform_bin_installer::artefact::platform::PlatformKey;
///
/// let key = PlatformKey::new("linux", "x86_64");
/// assert_eq!(key.to_string(), "linux/x86_64");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlatformKey {
    os: String,
    arch: String,
}

impl PlatformKey {
    /// Create a key from explicit identifiers.
    #[must_use]
    pub fn new(os: impl Into<String>, arch: impl Into<String>) -> Self {
        Self {
            os: os.into(),
            arch: arch.into(),
        }
    }

    /// Return the key for the platform this binary was compiled for.
    #[must_use]
    pub fn host() -> Self {
        Self::new(std::env::consts::OS, std::env::consts::ARCH)
    }

    /// Return the host key with either identifier replaced when given.
    ///
    /// # Examples
    ///
    /// ```
    /// use terraform_bin_installer::artefact::platform::PlatformKey;
    ///
    /// let key = PlatformKey::host_with_overrides(Some("windows"), Some("x86_64"));
    /// assert_eq!(key, PlatformKey::new("windows", "x86_64"));
    /// ```
    #[must_use]
    pub fn host_with_overrides(os: Option<&str>, arch: Option<&str>) -> Self {
        Self::new(
            os.unwrap_or(std::env::consts::OS),
            arch.unwrap_or(std::env::consts::ARCH),
        )
    }

    /// Return the operating-system identifier.
    #[must_use]
    pub fn os(&self) -> &str {
        &self.os
    }

    /// Return the architecture identifier.
    #[must_use]
    pub fn arch(&self) -> &str {
        &self.arch
    }

    /// Return the file name the executable is installed under.
    ///
    /// Only native Windows gets the `.exe` suffix. Cygwin shares the Windows
    /// archive but runs the executable under its POSIX name.
    ///
    /// # Examples
    ///
    /// ```
    /// use terraform_bin_installer::artefact::platform::PlatformKey;
    ///
    /// assert_eq!(PlatformKey::new("windows", "x86_64").executable_name(), "terraform.exe");
    /// assert_eq!(PlatformKey::new("cygwin", "x86_64").executable_name(), "terraform");
    /// ```
    #[must_use]
    pub fn executable_name(&self) -> &'static str {
        if self.os == "windows" {
            "terraform.exe"
        } else {
            TOOL_NAME
        }
    }
}

impl fmt::Display for PlatformKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.os, self.arch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn host_uses_compile_time_constants() {
        let key = PlatformKey::host();
        assert_eq!(key.os(), std::env::consts::OS);
        assert_eq!(key.arch(), std::env::consts::ARCH);
    }

    #[rstest]
    #[case::no_overrides(None, None, std::env::consts::OS, std::env::consts::ARCH)]
    #[case::os_only(Some("macos"), None, "macos", std::env::consts::ARCH)]
    #[case::arch_only(None, Some("aarch64"), std::env::consts::OS, "aarch64")]
    #[case::both(Some("linux"), Some("x86_64"), "linux", "x86_64")]
    fn overrides_replace_individual_identifiers(
        #[case] os: Option<&str>,
        #[case] arch: Option<&str>,
        #[case] expected_os: &str,
        #[case] expected_arch: &str,
    ) {
        let key = PlatformKey::host_with_overrides(os, arch);
        assert_eq!(key, PlatformKey::new(expected_os, expected_arch));
    }

    #[rstest]
    #[case::windows("windows", "terraform.exe")]
    #[case::cygwin("cygwin", "terraform")]
    #[case::linux("linux", "terraform")]
    #[case::macos("macos", "terraform")]
    fn executable_name_follows_operating_system(#[case] os: &str, #[case] expected: &str) {
        assert_eq!(PlatformKey::new(os, "x86_64").executable_name(), expected);
    }
}
