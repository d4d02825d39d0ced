//! `terraform-fmt` entrypoint.
//!
//! Checks each file given on the command line with `terraform fmt` and exits
//! with the last non-zero code observed.

use clap::Parser;
use log::{LevelFilter, info};
use terraform_bin::cli::Cli;
use terraform_bin::executor::SystemCommandRunner;
use terraform_bin::{check_files, exit_code};

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbosity);

    let checks = check_files(&SystemCommandRunner, &cli.terraform, &cli.files);
    let code = exit_code(&checks);
    info!("checked {} file(s), exit code {code}", checks.len());
    std::process::exit(code);
}

/// Map `-v` occurrences to a log level; `RUST_LOG` still takes precedence.
fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}
