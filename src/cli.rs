//! CLI argument definitions for `terraform-fmt`.

use clap::Parser;
use std::path::PathBuf;

/// Environment variable naming the Terraform executable.
pub const TERRAFORM_BIN_ENV: &str = "TERRAFORM_BIN";

/// Check that Terraform files are formatted.
#[derive(Parser, Debug)]
#[command(name = "terraform-fmt")]
#[command(version, about)]
#[command(long_about = concat!(
    "Check that Terraform files are formatted.\n\n",
    "Runs `terraform fmt -diff -check` once per file. Every file is checked even ",
    "after a failure, and the exit code is the last non-zero code Terraform ",
    "returned. A Terraform executable that cannot be started counts as 127.",
))]
pub struct Cli {
    /// Terraform executable to run.
    #[arg(long, env = TERRAFORM_BIN_ENV, value_name = "PATH", default_value = "terraform")]
    pub terraform: PathBuf,

    /// Increase log verbosity (repeatable: -v, -vv, -vvv).
    #[arg(short, long = "verbose", action = clap::ArgAction::Count)]
    pub verbosity: u8,

    /// Files to check.
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,
}
