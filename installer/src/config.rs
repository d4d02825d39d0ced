//! Configuration file loading and override resolution.
//!
//! Settings are layered: command-line flags win over environment variables,
//! which win over the optional TOML configuration file, which wins over the
//! built-in defaults.

use crate::artefact::release::DEFAULT_BASE_URL;
use crate::error::{InstallerError, Result};
use camino::{Utf8Path, Utf8PathBuf};
use log::debug;
use serde::Deserialize;
use std::time::Duration;

/// Environment variable overriding the release host.
pub const BASE_URL_ENV: &str = "TERRAFORM_BIN_BASE_URL";

/// Environment variable overriding the install directory.
pub const INSTALL_DIR_ENV: &str = "TERRAFORM_BIN_INSTALL_DIR";

/// Contents of the optional TOML configuration file.
///
/// # Examples
///
/// ```
/// use camino::Utf8Path;
/// use terraform_bin_installer::config::parse_file_config;
///
/// let config = parse_file_config(
///     "base_url = \"https://mirror.example\"\ntimeout_secs = 60\n",
///     Utf8Path::new("terraform-bin.toml"),
/// ).unwrap();
/// assert_eq!(config.timeout_secs, Some(60));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    /// Release host, replacing `https://releases.hashicorp.com`.
    pub base_url: Option<String>,
    /// Directory the executable is copied into.
    pub install_dir: Option<Utf8PathBuf>,
    /// Whole-request timeout for the download, in seconds.
    pub timeout_secs: Option<u64>,
}

/// Values given on the command line.
#[derive(Debug, Clone, Copy, Default)]
pub struct CliOverrides<'a> {
    /// `--base-url`.
    pub base_url: Option<&'a str>,
    /// `--install-dir`.
    pub install_dir: Option<&'a Utf8Path>,
}

/// Fully resolved installer settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Release host.
    pub base_url: String,
    /// Install directory, if configured anywhere.
    pub install_dir: Option<Utf8PathBuf>,
    /// Download timeout; `None` keeps the transport default.
    pub timeout: Option<Duration>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            install_dir: None,
            timeout: None,
        }
    }
}

impl Settings {
    /// Resolve settings using the process environment.
    #[must_use]
    pub fn resolve(cli: &CliOverrides<'_>, file: FileConfig) -> Self {
        Self::resolve_with(cli, file, |key| std::env::var(key).ok())
    }

    /// Resolve settings with an injectable environment lookup.
    ///
    /// Empty environment values are ignored.
    #[must_use]
    pub fn resolve_with<F>(cli: &CliOverrides<'_>, file: FileConfig, env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| env(key).filter(|value| !value.is_empty());

        let base_url = cli
            .base_url
            .map(str::to_owned)
            .or_else(|| non_empty(BASE_URL_ENV))
            .or(file.base_url)
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_owned());

        let install_dir = cli
            .install_dir
            .map(Utf8Path::to_path_buf)
            .or_else(|| non_empty(INSTALL_DIR_ENV).map(Utf8PathBuf::from))
            .or(file.install_dir);

        let settings = Self {
            base_url,
            install_dir,
            timeout: file.timeout_secs.map(Duration::from_secs),
        };
        debug!("resolved settings: {settings:?}");
        settings
    }
}

/// Load the configuration file at `path`.
///
/// # Errors
///
/// Returns [`InstallerError::Config`] if the file cannot be read or parsed.
pub fn load_file_config(path: &Utf8Path) -> Result<FileConfig> {
    let contents = std::fs::read_to_string(path).map_err(|e| InstallerError::Config {
        path: path.to_owned(),
        reason: e.to_string(),
    })?;
    parse_file_config(&contents, path)
}

/// Parse configuration file contents; `path` is used for error messages.
///
/// # Errors
///
/// Returns [`InstallerError::Config`] on invalid TOML or unknown keys.
pub fn parse_file_config(contents: &str, path: &Utf8Path) -> Result<FileConfig> {
    toml::from_str(contents).map_err(|e| InstallerError::Config {
        path: path.to_owned(),
        reason: e.to_string(),
    })
}
