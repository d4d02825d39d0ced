//! Terraform release installer library.
//!
//! This crate provides the download, verification, extraction, and
//! installation pipeline for the pinned Terraform release. It is used by the
//! `terraform-bin-installer` CLI binary and can be consumed programmatically
//! for testing or custom packaging workflows.
//!
//! # Modules
//!
//! - [`artefact`] - Release table, download, verification, and extraction
//! - [`cli`] - Command-line argument definitions
//! - [`config`] - Configuration file loading and override resolution
//! - [`dirs`] - Directory resolution abstraction for platform-specific paths
//! - [`error`] - Semantic error types for every pipeline stage
//! - [`output`] - Human-readable and JSON output formatting
//! - [`pipeline`] - Resolve, download, verify, extract, and install orchestration
//! - [`stager`] - Executable installation and install-tree copying

pub mod artefact;
pub mod cli;
pub mod config;
pub mod dirs;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod stager;

#[cfg(any(test, feature = "test-support"))]
pub mod test_utils;
