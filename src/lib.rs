//! Formatting-check wrapper around the packaged Terraform executable.
//!
//! The `terraform-fmt` binary runs `terraform fmt -diff -check` once per
//! file and exits with the last non-zero exit code it saw, so it can sit in
//! a pre-commit hook next to the installed executable.
//!
//! # Modules
//!
//! - [`cli`] - Command-line argument definitions
//! - [`error`] - Wrapper error types
//! - [`executor`] - Process spawning behind a test seam
//! - [`fmt_check`] - Per-file checks and exit-code aggregation

pub mod cli;
pub mod error;
pub mod executor;
pub mod fmt_check;

pub use fmt_check::{FileCheck, check_files, exit_code};
