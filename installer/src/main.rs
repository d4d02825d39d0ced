//! Terraform installer CLI entrypoint.
//!
//! This binary resolves, downloads, verifies, and installs the pinned
//! Terraform release, and answers read-only queries about the release table.

mod install_flow;

use clap::Parser;
use install_flow::{RunContext, run_copy, run_fetch, run_install};
use log::LevelFilter;
use std::io::Write;
use terraform_bin_installer::artefact::platform::PlatformKey;
use terraform_bin_installer::artefact::release::{RELEASES, package_version, resolve};
use terraform_bin_installer::cli::{Cli, Command};
use terraform_bin_installer::config::{CliOverrides, FileConfig, Settings, load_file_config};
use terraform_bin_installer::dirs::{BaseDirs, SystemBaseDirs};
use terraform_bin_installer::error::{InstallerError, Result};
use terraform_bin_installer::output::{
    format_platforms_human, format_platforms_json, format_release, write_stderr_line,
};

fn main() {
    let cli = Cli::parse();
    if let Err(err) = cli.validate() {
        err.exit();
    }
    init_logging(cli.global.verbosity);
    let mut stdout = std::io::stdout();
    let mut stderr = std::io::stderr();
    let run_result = run(&cli, &SystemBaseDirs, &mut stdout, &mut stderr);
    let exit_code = exit_code_for_run_result(run_result, &mut stderr);
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}

/// Map `-v` occurrences to a log level; `RUST_LOG` still takes precedence.
fn init_logging(verbosity: u8) {
    env_logger::Builder::new()
        .filter_level(level_for_verbosity(verbosity))
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

fn level_for_verbosity(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

fn run(
    cli: &Cli,
    dirs: &dyn BaseDirs,
    stdout: &mut dyn Write,
    stderr: &mut dyn Write,
) -> Result<()> {
    let command = cli.effective_command();
    let settings = resolve_settings(cli, &command)?;
    let platform =
        PlatformKey::host_with_overrides(cli.global.os.as_deref(), cli.global.arch.as_deref());
    let context = RunContext {
        platform: &platform,
        settings: &settings,
        quiet: cli.global.quiet,
        dry_run: cli.global.dry_run,
    };

    match command {
        Command::Install(_) => run_install(&context, dirs, stderr),
        Command::Fetch(args) => run_fetch(&context, &args.build_dir, stderr),
        Command::Copy(args) => run_copy(&context, &args.build_dir, dirs, stderr),
        Command::Url => {
            let release = resolve(&platform, &settings.base_url)?;
            write_stdout_line(stdout, format_release(&release))
        }
        Command::Platforms(args) => {
            let text = if args.json {
                format_platforms_json(RELEASES).map_err(|e| InstallerError::WriteFailed {
                    source: std::io::Error::other(e),
                })?
            } else {
                format_platforms_human(RELEASES)
            };
            write_stdout_line(stdout, text)
        }
        Command::Version => write_stdout_line(stdout, package_version()),
    }
}

/// Layer CLI flags, environment, and the optional config file.
fn resolve_settings(cli: &Cli, command: &Command) -> Result<Settings> {
    let file = match &cli.global.config {
        Some(path) => load_file_config(path)?,
        None => FileConfig::default(),
    };
    let install_dir = match command {
        Command::Install(args) => args.install_dir.as_deref(),
        Command::Copy(args) => args.install_dir.as_deref(),
        _ => None,
    };
    let overrides = CliOverrides {
        base_url: cli.global.base_url.as_deref(),
        install_dir,
    };
    Ok(Settings::resolve(&overrides, file))
}

fn write_stdout_line(stdout: &mut dyn Write, message: impl std::fmt::Display) -> Result<()> {
    writeln!(stdout, "{message}").map_err(|source| InstallerError::WriteFailed { source })
}

fn exit_code_for_run_result(result: Result<()>, stderr: &mut dyn Write) -> i32 {
    match result {
        Ok(()) => 0,
        Err(err) => {
            write_stderr_line(stderr, format!("error: {err}"));
            1
        }
    }
}
