//! Output formatting for the installer CLI.
//!
//! Progress and diagnostics go to stderr line by line; command results
//! (URLs, tables, versions) go to stdout so they can be piped.

use crate::artefact::release::{RELEASES, ReleaseEntry, ResolvedRelease, TERRAFORM_VERSION};
use camino::Utf8Path;
use std::io::Write;
use std::path::Path;

/// Write one line to `stderr`, ignoring write failures.
pub fn write_stderr_line(stderr: &mut dyn Write, message: impl std::fmt::Display) {
    if writeln!(stderr, "{message}").is_err() {
        // Best-effort logging; ignore write failures.
    }
}

/// Format a resolved release for the `url` subcommand.
///
/// # Examples
///
/// ```
/// use terraform_bin_installer::artefact::platform::PlatformKey;
/// use terraform_bin_installer::artefact::release::{DEFAULT_BASE_URL, resolve};
/// use terraform_bin_installer::output::format_release;
///
/// let release = resolve(&PlatformKey::new("linux", "x86_64"), DEFAULT_BASE_URL).unwrap();
/// let text = format_release(&release);
/// assert!(text.starts_with("https://releases.hashicorp.com/terraform/1.4.6/"));
/// ```
#[must_use]
pub fn format_release(release: &ResolvedRelease) -> String {
    format!("{}\nsha256: {}", release.url, release.expected)
}

/// Format the release table as aligned columns.
#[must_use]
pub fn format_platforms_human(entries: &[ReleaseEntry]) -> String {
    let rows = entries.iter().map(|entry| {
        let key = format!("{}/{}", entry.os, entry.arch);
        format!(
            "  {key:<16} {:<20} {}",
            entry.descriptor.suffix(),
            entry.descriptor.sha256()
        )
    });
    std::iter::once(format!("Terraform {TERRAFORM_VERSION} releases:"))
        .chain(rows)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format the release table as JSON.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn format_platforms_json(entries: &[ReleaseEntry]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&serde_json::json!({
        "version": TERRAFORM_VERSION,
        "platforms": entries,
    }))
}

/// Format the full table with the default layout.
#[must_use]
pub fn platforms_table() -> String {
    format_platforms_human(RELEASES)
}

/// Format a success message after installation.
#[must_use]
pub fn success_message(executable: &Utf8Path) -> String {
    format!("Installed Terraform {TERRAFORM_VERSION} to {executable}")
}

/// Checks if a directory is in the PATH environment variable.
#[must_use]
pub fn is_directory_in_path(dir: &Path) -> bool {
    std::env::var_os("PATH")
        .map(|path| std::env::split_paths(&path).any(|p| p == dir))
        .unwrap_or(false)
}

/// Returns instructions for adding a directory to PATH.
#[must_use]
pub fn path_instructions(bin_dir: &Path) -> String {
    #[cfg(unix)]
    {
        format!(
            concat!(
                "Add the following to your shell profile (~/.bashrc or ~/.zshrc):\n",
                "  export PATH=\"{}:$PATH\""
            ),
            bin_dir.display()
        )
    }
    #[cfg(windows)]
    {
        format!(
            concat!(
                "Add the following directory to your PATH:\n",
                "  {}\n\n",
                "Or run in PowerShell:\n",
                "  [Environment]::SetEnvironmentVariable(",
                "\"PATH\", \"$env:PATH;{}\", \"User\")"
            ),
            bin_dir.display(),
            bin_dir.display()
        )
    }
    #[cfg(not(any(unix, windows)))]
    {
        format!("Add {} to your PATH", bin_dir.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn human_table_lists_every_entry() {
        let text = platforms_table();
        assert!(text.starts_with("Terraform 1.4.6 releases:"));
        for entry in RELEASES {
            assert!(text.contains(&format!("{}/{}", entry.os, entry.arch)));
            assert!(text.contains(entry.descriptor.sha256()));
        }
    }

    #[test]
    fn human_table_has_one_row_per_entry_without_trailing_newline() {
        let entries = &RELEASES[..2];
        let text = format_platforms_human(entries);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("  linux/aarch64    _linux_arm64.zip"), "{}", lines[1]);
        assert!(!text.ends_with('\n'));
    }

    #[test]
    fn json_table_round_trips_through_serde() {
        let json = format_platforms_json(RELEASES).expect("serialize");
        let value: serde_json::Value = serde_json::from_str(&json).expect("parse");
        assert_eq!(value["version"], TERRAFORM_VERSION);
        let platforms = value["platforms"].as_array().expect("array");
        assert_eq!(platforms.len(), RELEASES.len());
        assert_eq!(platforms[0]["suffix"], "_linux_arm64.zip");
        assert_eq!(platforms[0]["os"], "linux");
    }

    #[test]
    fn write_stderr_line_appends_newline() {
        let mut buffer = Vec::new();
        write_stderr_line(&mut buffer, "hello");
        assert_eq!(buffer, b"hello\n");
    }

    #[test]
    fn is_directory_in_path_returns_false_for_random_dir() {
        let temp = TempDir::new().expect("failed to create temp dir");
        assert!(!is_directory_in_path(temp.path()));
    }

    #[test]
    fn path_instructions_contains_directory() {
        let dir = std::path::PathBuf::from("/test/bin");
        let instructions = path_instructions(&dir);
        assert!(instructions.contains("/test/bin"));
    }
}
