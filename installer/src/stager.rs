//! Executable installation and install-tree copying.
//!
//! The fetch step writes the extracted executable into a fresh build
//! directory and marks it executable. The copy step then mirrors that build
//! directory into the install directory, keeping permission bits.

use crate::error::{InstallerError, Result};
use camino::{Utf8Path, Utf8PathBuf};
use log::{debug, trace};
use std::fs;
use std::io::ErrorKind;

/// Execute permission for owner, group, and other (`S_IXUSR | S_IXGRP | S_IXOTH`).
pub const EXECUTE_BITS: u32 = 0o111;

/// Write `data` as `file_name` inside the new directory `dest_dir`.
///
/// Parent directories are created as needed, but `dest_dir` itself must not
/// exist yet. The written file gains [`EXECUTE_BITS`] on top of whatever
/// mode it was created with.
///
/// # Errors
///
/// Returns [`InstallerError::DestinationExists`] if `dest_dir` already
/// exists, or [`InstallerError::Io`] if any filesystem operation fails.
pub fn install_executable(
    data: &[u8],
    dest_dir: &Utf8Path,
    file_name: &str,
) -> Result<Utf8PathBuf> {
    if let Some(parent) = dest_dir.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::create_dir(dest_dir).map_err(|e| {
        if e.kind() == ErrorKind::AlreadyExists {
            InstallerError::DestinationExists {
                path: dest_dir.to_owned(),
            }
        } else {
            InstallerError::Io(e)
        }
    })?;

    let output_path = dest_dir.join(file_name);
    fs::write(&output_path, data)?;
    mark_executable(&output_path)?;
    debug!("wrote {} bytes to {output_path}", data.len());
    Ok(output_path)
}

/// Add [`EXECUTE_BITS`] to the mode of `path`, keeping existing bits.
#[cfg(unix)]
fn mark_executable(path: &Utf8Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let mut perms = fs::metadata(path)?.permissions();
    perms.set_mode(perms.mode() | EXECUTE_BITS);
    fs::set_permissions(path, perms)?;
    Ok(())
}

/// Windows has no execute bit; the `.exe` suffix is sufficient.
#[cfg(not(unix))]
fn mark_executable(_path: &Utf8Path) -> Result<()> {
    Ok(())
}

/// Copy every file under `build_dir` into `install_dir`.
///
/// `install_dir` is created if absent and existing files are overwritten.
/// Permission bits travel with each file. Returns the written paths in
/// sorted order.
///
/// # Errors
///
/// Returns [`InstallerError::Io`] if a directory cannot be read or a file
/// cannot be copied, and [`InstallerError::InstallDirUnavailable`] if an
/// entry under `build_dir` has a non-UTF-8 name.
pub fn copy_tree(build_dir: &Utf8Path, install_dir: &Utf8Path) -> Result<Vec<Utf8PathBuf>> {
    let mut outputs = Vec::new();
    copy_dir_into(build_dir, install_dir, &mut outputs)?;
    outputs.sort();
    Ok(outputs)
}

fn copy_dir_into(src: &Utf8Path, dst: &Utf8Path, outputs: &mut Vec<Utf8PathBuf>) -> Result<()> {
    fs::create_dir_all(dst)?;
    for dir_entry in src.read_dir_utf8()? {
        let entry = dir_entry?;
        let target = dst.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            copy_dir_into(entry.path(), &target, outputs)?;
        } else {
            trace!("copying {} to {target}", entry.path());
            fs::copy(entry.path(), &target)?;
            outputs.push(target);
        }
    }
    Ok(())
}
