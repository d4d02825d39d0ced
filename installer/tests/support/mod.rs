//! Test support utilities for installer behavioural tests.
//!
//! This module provides common helpers used across test files: UTF-8
//! temporary directories, platform-key parsing for step text, and a
//! pre-configured command for the installer binary.

#![allow(dead_code, reason = "each test binary uses a subset of helpers")]

use camino::Utf8PathBuf;
use std::process::Command;
use tempfile::TempDir;
use terraform_bin_installer::artefact::platform::PlatformKey;
use terraform_bin_installer::config::{BASE_URL_ENV, INSTALL_DIR_ENV};

/// Creates a temporary directory and returns it with its UTF-8 path.
///
/// Keep the [`TempDir`] alive for as long as the path is used.
pub fn utf8_temp_dir() -> (TempDir, Utf8PathBuf) {
    let temp = tempfile::tempdir().expect("temp dir");
    let path = Utf8PathBuf::try_from(temp.path().to_path_buf()).expect("UTF-8 temp path");
    (temp, path)
}

/// Parses `"os/arch"` step text into a [`PlatformKey`].
pub fn parse_platform(text: &str) -> PlatformKey {
    let (os, arch) = text
        .split_once('/')
        .unwrap_or_else(|| panic!("platform must be written as os/arch, got {text}"));
    PlatformKey::new(os, arch)
}

/// Returns a command for the installer binary with inherited overrides removed.
pub fn installer_command() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_terraform-bin-installer"));
    cmd.env_remove(BASE_URL_ENV)
        .env_remove(INSTALL_DIR_ENV)
        .env_remove("RUST_LOG");
    cmd
}
