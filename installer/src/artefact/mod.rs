//! Release lookup, download, verification, and extraction.
//!
//! This module implements the type-safe domain model for fetching the pinned
//! Terraform release, covering:
//!
//! - [`platform`] - Platform key (`PlatformKey`) and host detection.
//! - [`release`] - Static release table, URL construction, and versioning.
//! - [`sha256_digest`] - SHA-256 digest newtype (`Sha256Digest`).
//! - [`error`] - Semantic error types for release lookup failures.
//! - [`download`] - Artefact download trait and HTTP implementation.
//! - [`verification`] - Checksum verification of downloaded bytes.
//! - [`extraction`] - In-memory archive scanning for the executable entry.

pub mod download;
pub mod error;
pub mod extraction;
pub mod platform;
pub mod release;
pub mod sha256_digest;
pub mod verification;
