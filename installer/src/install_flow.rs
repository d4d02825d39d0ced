//! Install-flow helpers for the installer binary.
//!
//! This module keeps the fetch, copy, and combined install steps separate
//! from argument handling in `main.rs`.

use camino::{Utf8Path, Utf8PathBuf};
use log::info;
use std::io::Write;
use terraform_bin_installer::artefact::download::{ArtefactDownloader, HttpDownloader};
use terraform_bin_installer::artefact::extraction::{ArtefactExtractor, ZipExtractor};
use terraform_bin_installer::artefact::platform::PlatformKey;
use terraform_bin_installer::artefact::release::resolve;
use terraform_bin_installer::config::Settings;
use terraform_bin_installer::dirs::{BaseDirs, default_install_dir};
use terraform_bin_installer::error::{InstallerError, Result};
use terraform_bin_installer::output::{
    is_directory_in_path, path_instructions, success_message, write_stderr_line,
};
use terraform_bin_installer::pipeline::{FetchConfig, fetch_executable, fetch_executable_with};
use terraform_bin_installer::stager::copy_tree;

/// Everything a subcommand needs besides its own arguments.
pub(crate) struct RunContext<'a> {
    /// Platform to resolve the release for.
    pub(crate) platform: &'a PlatformKey,
    /// Resolved installer settings.
    pub(crate) settings: &'a Settings,
    /// Whether progress output is suppressed.
    pub(crate) quiet: bool,
    /// Whether to stop after resolution.
    pub(crate) dry_run: bool,
}

/// Fetch terraform into `build_dir`.
pub(crate) fn run_fetch(
    context: &RunContext<'_>,
    build_dir: &Utf8Path,
    stderr: &mut dyn Write,
) -> Result<()> {
    if context.dry_run {
        return print_dry_run(context, Some(build_dir), None, stderr);
    }

    let outcome = fetch_executable(&fetch_config(context, build_dir), stderr)?;
    if !context.quiet {
        write_stderr_line(stderr, format!("Fetched {}", outcome.executable));
    }
    Ok(())
}

/// Copy `build_dir` into the configured install directory.
pub(crate) fn run_copy(
    context: &RunContext<'_>,
    build_dir: &Utf8Path,
    dirs: &dyn BaseDirs,
    stderr: &mut dyn Write,
) -> Result<()> {
    let install_dir = determine_install_dir(context.settings, dirs)?;
    if context.dry_run {
        write_stderr_line(stderr, "Dry run - no files will be modified");
        write_stderr_line(stderr, "");
        write_stderr_line(stderr, format!("Build directory: {build_dir}"));
        write_stderr_line(stderr, format!("Install directory: {install_dir}"));
        return Ok(());
    }

    let outputs = copy_tree(build_dir, &install_dir)?;
    if !context.quiet {
        for output in &outputs {
            write_stderr_line(stderr, format!("Copied {output}"));
        }
    }
    Ok(())
}

/// Fetch into a temporary build directory, then copy into the install
/// directory.
pub(crate) fn run_install(
    context: &RunContext<'_>,
    dirs: &dyn BaseDirs,
    stderr: &mut dyn Write,
) -> Result<()> {
    let downloader = HttpDownloader::new(context.settings.timeout);
    run_install_with(context, dirs, &downloader, &ZipExtractor, stderr)
}

/// Testable inner function with injected download and extraction.
pub(crate) fn run_install_with(
    context: &RunContext<'_>,
    dirs: &dyn BaseDirs,
    downloader: &dyn ArtefactDownloader,
    extractor: &dyn ArtefactExtractor,
    stderr: &mut dyn Write,
) -> Result<()> {
    let install_dir = determine_install_dir(context.settings, dirs)?;
    if context.dry_run {
        return print_dry_run(context, None, Some(&install_dir), stderr);
    }

    let temp = tempfile::Builder::new().prefix("terraform-bin-").tempdir()?;
    let build_dir = Utf8PathBuf::from_path_buf(temp.path().join("scripts")).map_err(|path| {
        InstallerError::Io(std::io::Error::other(format!(
            "temporary directory is not valid UTF-8: {}",
            path.display()
        )))
    })?;

    let config = fetch_config(context, &build_dir);
    let outcome = fetch_executable_with(&config, downloader, extractor, stderr)?;
    let outputs = copy_tree(&build_dir, &install_dir)?;
    info!("installed {} file(s) into {install_dir}", outputs.len());

    if !context.quiet {
        let installed = install_dir.join(outcome.release.executable_name);
        write_stderr_line(stderr, success_message(&installed));
        if !is_directory_in_path(install_dir.as_std_path()) {
            write_stderr_line(stderr, "");
            write_stderr_line(stderr, path_instructions(install_dir.as_std_path()));
        }
    }
    Ok(())
}

fn fetch_config<'a>(context: &RunContext<'a>, build_dir: &'a Utf8Path) -> FetchConfig<'a> {
    FetchConfig {
        platform: context.platform,
        base_url: &context.settings.base_url,
        build_dir,
        timeout: context.settings.timeout,
        quiet: context.quiet,
    }
}

/// Determines the install directory from settings or falls back to the
/// platform default.
pub(crate) fn determine_install_dir(settings: &Settings, dirs: &dyn BaseDirs) -> Result<Utf8PathBuf> {
    match &settings.install_dir {
        Some(dir) => Ok(dir.clone()),
        None => default_install_dir(dirs),
    }
}

/// Prints dry run configuration information.
fn print_dry_run(
    context: &RunContext<'_>,
    build_dir: Option<&Utf8Path>,
    install_dir: Option<&Utf8Path>,
    stderr: &mut dyn Write,
) -> Result<()> {
    let release = resolve(context.platform, &context.settings.base_url)?;

    write_stderr_line(stderr, "Dry run - no files will be modified");
    write_stderr_line(stderr, "");
    write_stderr_line(stderr, format!("Platform: {}", context.platform));
    write_stderr_line(stderr, format!("URL: {}", release.url));
    write_stderr_line(stderr, format!("SHA-256: {}", release.expected));
    write_stderr_line(stderr, format!("Executable: {}", release.executable_name));
    if let Some(dir) = build_dir {
        write_stderr_line(stderr, format!("Build directory: {dir}"));
    }
    if let Some(dir) = install_dir {
        write_stderr_line(stderr, format!("Install directory: {dir}"));
    }
    if let Some(timeout) = context.settings.timeout {
        write_stderr_line(stderr, format!("Timeout: {}s", timeout.as_secs()));
    }
    Ok(())
}
