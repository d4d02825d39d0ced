//! Directory resolution abstraction for platform-specific paths.
//!
//! The default install directory is the user's executable directory, the
//! closest per-user analogue of a package manager's scripts directory.

use crate::error::{InstallerError, Result};
use camino::Utf8PathBuf;
use std::path::PathBuf;

/// Provides platform base directories.
#[cfg_attr(test, mockall::automock)]
pub trait BaseDirs {
    /// Returns the user's home directory.
    fn home_dir(&self) -> Option<PathBuf>;

    /// Returns the directory user executables are installed into.
    fn bin_dir(&self) -> Option<PathBuf>;
}

/// Resolves directories with `directories-next`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemBaseDirs;

impl BaseDirs for SystemBaseDirs {
    fn home_dir(&self) -> Option<PathBuf> {
        directories_next::BaseDirs::new().map(|dirs| dirs.home_dir().to_path_buf())
    }

    fn bin_dir(&self) -> Option<PathBuf> {
        let dirs = directories_next::BaseDirs::new()?;
        // Only Linux reports an executable directory; elsewhere use the XDG layout.
        Some(dirs.executable_dir().map_or_else(
            || dirs.home_dir().join(".local").join("bin"),
            std::path::Path::to_path_buf,
        ))
    }
}

/// Returns the default install directory.
///
/// # Errors
///
/// Returns [`InstallerError::InstallDirUnavailable`] when no bin directory
/// can be determined or it is not valid UTF-8.
pub fn default_install_dir(dirs: &dyn BaseDirs) -> Result<Utf8PathBuf> {
    let bin_dir = dirs
        .bin_dir()
        .ok_or_else(|| InstallerError::InstallDirUnavailable {
            reason: "could not determine the user bin directory".to_owned(),
        })?;
    Utf8PathBuf::from_path_buf(bin_dir).map_err(|path| InstallerError::InstallDirUnavailable {
        reason: format!("bin directory is not valid UTF-8: {}", path.display()),
    })
}
