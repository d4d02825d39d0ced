//! Running external commands.
//!
//! Commands inherit the wrapper's stdio so Terraform's diff output reaches
//! the user unchanged; only the exit code is reported back.

use crate::error::{FmtError, Result};
use std::ffi::OsStr;
use std::path::Path;
use std::process::{Command, ExitStatus};

/// Abstraction for running external commands.
pub trait CommandRunner {
    /// Runs `program` with `args` to completion and returns its exit code.
    ///
    /// # Errors
    ///
    /// Returns [`FmtError::Spawn`] when the process cannot be started.
    fn run(&self, program: &Path, args: &[&OsStr]) -> Result<i32>;
}

/// Runs commands on the host system.
///
/// # Examples
///
/// ```no_run
/// use std::ffi::OsStr;
/// use std::path::Path;
/// use terraform_bin::executor::{CommandRunner, SystemCommandRunner};
///
/// let code = SystemCommandRunner.run(Path::new("terraform"), &[OsStr::new("version")])?;
/// assert_eq!(code, 0);
/// # Ok::<(), terraform_bin::error::FmtError>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemCommandRunner;

impl CommandRunner for SystemCommandRunner {
    fn run(&self, program: &Path, args: &[&OsStr]) -> Result<i32> {
        let status = Command::new(program)
            .args(args)
            .status()
            .map_err(|source| FmtError::Spawn {
                program: program.to_path_buf(),
                source,
            })?;
        Ok(exit_code_for_status(status))
    }
}

/// Converts a process status into a shell-style exit code.
///
/// Processes killed by a signal report `128 + signal` on Unix.
#[must_use]
pub fn exit_code_for_status(status: ExitStatus) -> i32 {
    status.code().unwrap_or_else(|| signal_exit_code(status))
}

#[cfg(unix)]
fn signal_exit_code(status: ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;

    status.signal().map_or(1, |signal| 128 + signal)
}

#[cfg(not(unix))]
const fn signal_exit_code(_status: ExitStatus) -> i32 {
    1
}
