//! jaab CLI entrypoint.
//!
//! This binary builds a JMP add-in archive from a tagged release and uploads
//! it to that release. Diagnostics go to stderr through `tracing-subscriber`,
//! which also collects the library's `log` records. `-v`/`-q` set the default
//! level and `RUST_LOG` directives refine it.

use clap::Parser;
use jaab::cli::Cli;
use jaab::error::Result;
use jaab::github::client::HttpGitHubClient;
use jaab::output::write_stderr_line;
use jaab::pipeline::{BuildOutcome, run_build};
use std::io::Write;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbosity, cli.quiet);

    let mut stderr = std::io::stderr();
    let run_result = run(&cli, &mut stderr);
    let exit_code = exit_code_for_run_result(run_result, &mut stderr);
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}

fn init_logging(verbosity: u8, quiet: bool) {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(verbosity, quiet))
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}

fn env_filter(verbosity: u8, quiet: bool) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(level_filter(verbosity, quiet).into())
        .from_env_lossy()
}

fn run(cli: &Cli, stderr: &mut dyn Write) -> Result<BuildOutcome> {
    let settings = cli.build_settings()?;
    let client = HttpGitHubClient::new(&cli.api_url, &cli.token);
    run_build(&settings, &client, stderr)
}

/// Map `-v` occurrences and `-q` to a log level.
fn level_filter(verbosity: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::ERROR;
    }
    match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

fn exit_code_for_run_result(result: Result<BuildOutcome>, stderr: &mut dyn Write) -> i32 {
    match result {
        Ok(_) => 0,
        Err(err) => {
            write_stderr_line(stderr, format_args!("error: {err}"));
            1
        }
    }
}
