//! Resolve, download, verify, extract, and install orchestration.
//!
//! The pipeline is strictly linear:
//! `Resolved → Downloaded → Verified → Extracted → Installed`. Each stage
//! consumes the previous stage's output and any failure aborts the run with
//! the stage's own error kind. Nothing is retried and nothing is cleaned up;
//! in particular no byte reaches the disk unless its digest matched.

use camino::{Utf8Path, Utf8PathBuf};
use log::{debug, info};
use std::fmt;
use std::io::Write;
use std::time::Duration;

use crate::artefact::download::{ArtefactDownloader, HttpDownloader};
use crate::artefact::extraction::{ArtefactExtractor, ZipExtractor};
use crate::artefact::platform::PlatformKey;
use crate::artefact::release::{ResolvedRelease, resolve};
use crate::artefact::verification::verify_sha256;
use crate::error::Result;
use crate::output::write_stderr_line;
use crate::stager::install_executable;

/// Pipeline stages, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// The platform key was matched against the release table.
    Resolved,
    /// The archive bytes are in memory.
    Downloaded,
    /// The archive digest matched.
    Verified,
    /// The executable bytes were located in the archive.
    Extracted,
    /// The executable was written and marked executable.
    Installed,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Resolved => "resolved",
            Self::Downloaded => "downloaded",
            Self::Verified => "verified",
            Self::Extracted => "extracted",
            Self::Installed => "installed",
        };
        f.write_str(name)
    }
}

/// Configuration for one fetch run.
#[derive(Debug)]
pub struct FetchConfig<'a> {
    /// Platform to fetch the release for.
    pub platform: &'a PlatformKey,
    /// Release host.
    pub base_url: &'a str,
    /// Fresh directory the executable is written into.
    pub build_dir: &'a Utf8Path,
    /// Download timeout; `None` keeps the transport default.
    pub timeout: Option<Duration>,
    /// When true, suppress progress output.
    pub quiet: bool,
}

/// The outcome of a successful fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOutcome {
    /// The release that was installed.
    pub release: ResolvedRelease,
    /// Path of the written executable.
    pub executable: Utf8PathBuf,
}

/// Fetch the release for `config.platform` into `config.build_dir` using
/// the production HTTP downloader and zip extractor.
///
/// # Errors
///
/// Returns the error of the first stage that fails.
pub fn fetch_executable(config: &FetchConfig<'_>, stderr: &mut dyn Write) -> Result<FetchOutcome> {
    let downloader = HttpDownloader::new(config.timeout);
    fetch_executable_with(config, &downloader, &ZipExtractor, stderr)
}

/// Testable inner function with injected dependencies.
///
/// The production entry point [`fetch_executable`] delegates here with
/// real implementations; tests inject stubs.
///
/// # Errors
///
/// Returns the error of the first stage that fails.
pub fn fetch_executable_with(
    config: &FetchConfig<'_>,
    downloader: &dyn ArtefactDownloader,
    extractor: &dyn ArtefactExtractor,
    stderr: &mut dyn Write,
) -> Result<FetchOutcome> {
    let release = resolve(config.platform, config.base_url)?;
    stage_complete(Stage::Resolved, config.platform);
    if !config.quiet {
        write_stderr_line(stderr, &release.url);
    }

    fetch_release_with(release, config.build_dir, downloader, extractor)
}

/// Run the download, verify, extract, and install stages for an already
/// resolved release.
///
/// # Errors
///
/// Returns the error of the first stage that fails. The build directory is
/// only touched once the archive digest has matched.
pub fn fetch_release_with(
    release: ResolvedRelease,
    build_dir: &Utf8Path,
    downloader: &dyn ArtefactDownloader,
    extractor: &dyn ArtefactExtractor,
) -> Result<FetchOutcome> {
    let archive = downloader.download(&release.url)?;
    stage_complete(Stage::Downloaded, &format_args!("{} bytes", archive.len()));

    verify_sha256(&archive, &release.expected)?;
    stage_complete(Stage::Verified, &release.expected);

    let executable_bytes = extractor.extract_executable(&release.url, &archive)?;
    drop(archive);
    stage_complete(Stage::Extracted, &format_args!("{} bytes", executable_bytes.len()));

    let executable = install_executable(&executable_bytes, build_dir, release.executable_name)?;
    stage_complete(Stage::Installed, &executable);
    info!("terraform for {} written to {executable}", release.platform);

    Ok(FetchOutcome {
        release,
        executable,
    })
}

fn stage_complete(stage: Stage, detail: &dyn fmt::Display) {
    debug!("stage {stage}: {detail}");
}

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod tests;
