//! CLI argument definitions for the Terraform installer.
//!
//! This module defines the command-line interface using clap. It is separated
//! from the main entrypoint to keep the binary small and focused on
//! orchestration.

use camino::Utf8PathBuf;
use clap::error::ErrorKind;
use clap::{Args, CommandFactory, Parser, Subcommand};

/// Download, verify, and install the pinned Terraform release.
#[derive(Parser, Debug, Default)]
#[command(name = "terraform-bin-installer")]
#[command(about)]
#[command(long_about = concat!(
    "Download, verify, and install the pinned Terraform release.\n\n",
    "The installer looks up the release archive for the host platform, downloads ",
    "it over HTTPS, checks its SHA-256 digest against the built-in release table, ",
    "extracts the terraform executable, and installs it with execute permission.\n\n",
    "Nothing is written to disk unless the digest matches. Every failure is fatal; ",
    "there are no retries and no fallback sources.",
))]
#[command(after_help = concat!(
    "ENVIRONMENT:\n",
    "  TERRAFORM_BIN_BASE_URL       Release host (default https://releases.hashicorp.com)\n",
    "  TERRAFORM_BIN_INSTALL_DIR    Install directory (default: user bin directory)\n",
    "  RUST_LOG                     Log filter, overriding -v\n\n",
    "EXAMPLES:\n",
    "  Install terraform into the user bin directory:\n",
    "    $ terraform-bin-installer\n\n",
    "  Fetch into a build directory, then copy into a prefix:\n",
    "    $ terraform-bin-installer fetch --build-dir build/scripts\n",
    "    $ terraform-bin-installer copy --build-dir build/scripts --install-dir /opt/bin\n\n",
    "  Show the download URL for another platform:\n",
    "    $ terraform-bin-installer --os macos --arch aarch64 url\n\n",
    "  List supported platforms as JSON:\n",
    "    $ terraform-bin-installer platforms --json\n\n",
    "  Print the package version:\n",
    "    $ terraform-bin-installer version",
))]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Options shared by every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Install arguments (used when no subcommand is given).
    #[command(flatten)]
    pub install: InstallArgs,
}

impl Cli {
    /// Return the command to run, defaulting to `install`.
    ///
    /// # Examples
    ///
    /// ```
    /// use clap::Parser;
    /// use terraform_bin_installer::cli::{Cli, Command};
    ///
    /// let cli = Cli::parse_from(["terraform-bin-installer"]);
    /// assert!(matches!(cli.effective_command(), Command::Install(_)));
    /// ```
    #[must_use]
    pub fn effective_command(&self) -> Command {
        self.command
            .clone()
            .unwrap_or_else(|| Command::Install(self.install.clone()))
    }

    /// Reject a top-level `--install-dir` combined with a subcommand.
    ///
    /// The top-level flag only feeds the default `install` command; with an
    /// explicit subcommand it would otherwise be dropped.
    ///
    /// # Errors
    ///
    /// Returns an [`ErrorKind::ArgumentConflict`] error naming the flag.
    pub fn validate(&self) -> Result<(), clap::Error> {
        match (&self.command, &self.install.install_dir) {
            (Some(_), Some(_)) => Err(Self::command().error(
                ErrorKind::ArgumentConflict,
                "--install-dir before a subcommand only applies to the default install; \
                 pass it after `install` or `copy` instead",
            )),
            _ => Ok(()),
        }
    }
}

/// Available subcommands.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Fetch terraform and copy it into the install directory (default).
    Install(InstallArgs),

    /// Fetch terraform into a fresh build directory.
    Fetch(FetchArgs),

    /// Copy a build directory into the install directory.
    Copy(CopyArgs),

    /// Print the download URL and expected digest.
    Url,

    /// List the supported platforms.
    Platforms(PlatformsArgs),

    /// Print the package version identifier.
    Version,
}

/// Options accepted before or after any subcommand.
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct GlobalArgs {
    /// Operating system to resolve for [default: host].
    #[arg(long, global = true, value_name = "OS")]
    pub os: Option<String>,

    /// CPU architecture to resolve for [default: host].
    #[arg(long, global = true, value_name = "ARCH")]
    pub arch: Option<String>,

    /// Path to a TOML configuration file.
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<Utf8PathBuf>,

    /// Release host to download from.
    #[arg(long, global = true, value_name = "URL")]
    pub base_url: Option<String>,

    /// Resolve and print what would happen without touching the network.
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Increase log verbosity (repeatable: -v, -vv, -vvv).
    #[arg(
        short,
        long = "verbose",
        global = true,
        action = clap::ArgAction::Count,
        conflicts_with = "quiet"
    )]
    pub verbosity: u8,

    /// Suppress progress output (errors still shown).
    #[arg(short, long, global = true, conflicts_with = "verbosity")]
    pub quiet: bool,
}

/// Arguments for the install command.
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct InstallArgs {
    /// Directory to install terraform into [default: user bin directory].
    #[arg(short, long, value_name = "DIR")]
    pub install_dir: Option<Utf8PathBuf>,
}

/// Arguments for the fetch command.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct FetchArgs {
    /// Build directory to create; must not exist.
    #[arg(short, long, value_name = "DIR")]
    pub build_dir: Utf8PathBuf,
}

/// Arguments for the copy command.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct CopyArgs {
    /// Build directory written by `fetch`.
    #[arg(short, long, value_name = "DIR")]
    pub build_dir: Utf8PathBuf,

    /// Directory to install terraform into [default: user bin directory].
    #[arg(short, long, value_name = "DIR")]
    pub install_dir: Option<Utf8PathBuf>,
}

/// Arguments for the platforms command.
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct PlatformsArgs {
    /// Output in JSON format for scripting.
    #[arg(long)]
    pub json: bool,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
