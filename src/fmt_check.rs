//! Per-file `terraform fmt` checks and exit-code aggregation.

use crate::executor::CommandRunner;
use log::{debug, warn};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// Arguments passed to Terraform before each file path.
pub const FMT_ARGS: [&str; 3] = ["fmt", "-diff", "-check"];

/// Exit code recorded when the executable cannot be started.
pub const SPAWN_FAILURE_CODE: i32 = 127;

/// The result of checking one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileCheck {
    /// The file that was checked.
    pub path: PathBuf,
    /// Terraform's exit code for the file.
    pub code: i32,
}

/// Run `terraform fmt -diff -check <file>` for each file, in order.
///
/// Every file is checked even after a failure. A spawn failure is logged and
/// recorded as [`SPAWN_FAILURE_CODE`].
#[must_use]
pub fn check_files(
    runner: &dyn CommandRunner,
    terraform: &Path,
    files: &[PathBuf],
) -> Vec<FileCheck> {
    files
        .iter()
        .map(|path| FileCheck {
            path: path.clone(),
            code: check_file(runner, terraform, path),
        })
        .collect()
}

fn check_file(runner: &dyn CommandRunner, terraform: &Path, path: &Path) -> i32 {
    let mut args: Vec<&OsStr> = FMT_ARGS.iter().map(OsStr::new).collect();
    args.push(path.as_os_str());

    match runner.run(terraform, &args) {
        Ok(0) => {
            debug!("{} is formatted", path.display());
            0
        }
        Ok(code) => {
            debug!("{} failed the format check with code {code}", path.display());
            code
        }
        Err(err) => {
            warn!("{err}");
            SPAWN_FAILURE_CODE
        }
    }
}

/// Return the last non-zero code in `checks`, or 0 if every check passed.
///
/// # Examples
///
/// ```
/// use std::path::PathBuf;
/// use terraform_bin::{FileCheck, exit_code};
///
/// let checks = [
///     FileCheck { path: PathBuf::from("a.tf"), code: 3 },
///     FileCheck { path: PathBuf::from("b.tf"), code: 0 },
/// ];
/// assert_eq!(exit_code(&checks), 3);
/// ```
#[must_use]
pub fn exit_code(checks: &[FileCheck]) -> i32 {
    checks
        .iter()
        .rev()
        .map(|check| check.code)
        .find(|&code| code != 0)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{FmtError, Result};
    use rstest::rstest;
    use std::cell::RefCell;
    use std::collections::VecDeque;

    /// Runner returning scripted results and recording every invocation.
    struct StubRunner {
        results: RefCell<VecDeque<Result<i32>>>,
        calls: RefCell<Vec<(PathBuf, Vec<String>)>>,
    }

    impl StubRunner {
        fn with_codes(codes: &[i32]) -> Self {
            Self::new(codes.iter().map(|&code| Ok(code)).collect())
        }

        fn new(results: Vec<Result<i32>>) -> Self {
            Self {
                results: RefCell::new(results.into()),
                calls: RefCell::new(Vec::new()),
            }
        }
    }

    impl CommandRunner for StubRunner {
        fn run(&self, program: &Path, args: &[&OsStr]) -> Result<i32> {
            self.calls.borrow_mut().push((
                program.to_path_buf(),
                args.iter().map(|arg| arg.to_string_lossy().into_owned()).collect(),
            ));
            self.results
                .borrow_mut()
                .pop_front()
                .expect("unexpected command invocation")
        }
    }

    fn files(names: &[&str]) -> Vec<PathBuf> {
        names.iter().map(PathBuf::from).collect()
    }

    #[test]
    fn runs_fmt_check_once_per_file_in_order() {
        let runner = StubRunner::with_codes(&[0, 0]);
        let checks = check_files(&runner, Path::new("terraform"), &files(&["a.tf", "b.tf"]));

        assert_eq!(checks.len(), 2);
        let calls = runner.calls.borrow();
        assert_eq!(
            *calls,
            vec![
                (
                    PathBuf::from("terraform"),
                    vec!["fmt".to_owned(), "-diff".to_owned(), "-check".to_owned(), "a.tf".to_owned()]
                ),
                (
                    PathBuf::from("terraform"),
                    vec!["fmt".to_owned(), "-diff".to_owned(), "-check".to_owned(), "b.tf".to_owned()]
                ),
            ]
        );
    }

    #[rstest]
    #[case::all_pass(&[0, 0], 0)]
    #[case::second_fails(&[0, 2], 2)]
    #[case::first_fails(&[3, 0], 3)]
    #[case::last_non_zero_wins(&[2, 1], 1)]
    #[case::last_non_zero_not_highest(&[1, 0, 4, 0, 2], 2)]
    fn exit_code_is_last_non_zero(#[case] codes: &[i32], #[case] expected: i32) {
        let names: Vec<String> = (0..codes.len()).map(|i| format!("f{i}.tf")).collect();
        let paths: Vec<PathBuf> = names.iter().map(PathBuf::from).collect();
        let runner = StubRunner::with_codes(codes);

        let checks = check_files(&runner, Path::new("terraform"), &paths);

        assert_eq!(exit_code(&checks), expected);
    }

    #[test]
    fn no_files_means_success() {
        let runner = StubRunner::with_codes(&[]);
        let checks = check_files(&runner, Path::new("terraform"), &[]);
        assert!(checks.is_empty());
        assert_eq!(exit_code(&checks), 0);
    }

    #[test]
    fn spawn_failure_counts_as_127_and_later_files_still_run() {
        let runner = StubRunner::new(vec![
            Err(FmtError::Spawn {
                program: PathBuf::from("terraform"),
                source: std::io::Error::from(std::io::ErrorKind::NotFound),
            }),
            Ok(0),
        ]);

        let checks = check_files(&runner, Path::new("terraform"), &files(&["a.tf", "b.tf"]));

        assert_eq!(
            checks,
            vec![
                FileCheck {
                    path: PathBuf::from("a.tf"),
                    code: SPAWN_FAILURE_CODE,
                },
                FileCheck {
                    path: PathBuf::from("b.tf"),
                    code: 0,
                },
            ]
        );
        assert_eq!(exit_code(&checks), 127);
    }
}
