//! Shared test utilities for the installer crate.

use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;

/// Builds an in-memory zip archive containing `entries` in order.
///
/// Entries are stored with mode `0o644` so tests can observe that installed
/// executables gain execute bits regardless of archive metadata.
///
/// # Panics
///
/// Panics if the archive cannot be written.
pub fn zip_archive(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().unix_permissions(0o644);
    for (name, data) in entries {
        writer.start_file(*name, options).expect("start zip entry");
        writer.write_all(data).expect("write zip entry");
    }
    writer.finish().expect("finish zip archive").into_inner()
}

/// Returns the lowercase hex SHA-256 digest of `data`.
pub fn sha256_hex(data: &[u8]) -> String {
    crate::artefact::sha256_digest::Sha256Digest::compute(data).into_inner()
}
