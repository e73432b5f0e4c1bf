//! section-reorder - Main entry point
//!
//! Reorders the engine sections of a page in place and prints a human-readable
//! report. Exit code is 0 on success and 1 on any failure; on failure the
//! document is left untouched.

use anyhow::{Context, Result};
use std::process::ExitCode;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

use section_reorder::cli::Cli;
use section_reorder::{ReorderProfile, Reorderer, RunContext, RunOptions, report, runner};

/// Initialize tracing; RUST_LOG overrides the default level
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse_args();
    init_tracing(cli.verbose);
    debug!(?cli, "CLI arguments parsed");

    match execute(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("✗ {:#}", e);
            eprintln!("File left unchanged: {}", cli.file.display());
            ExitCode::FAILURE
        }
    }
}

fn execute(cli: &Cli) -> Result<()> {
    let profile = match &cli.profile {
        Some(path) => {
            info!("Loading profile from: {:?}", path);
            ReorderProfile::load_from_file(path)?
        }
        None => ReorderProfile::default(),
    };

    if let Some(path) = &cli.save_profile {
        profile.save_to_file(path)?;
        println!("✓ Profile written to {}", path.display());
        return Ok(());
    }

    let reorderer = Reorderer::new(profile).context("Invalid profile")?;
    let options = RunOptions {
        dry_run: cli.dry_run,
    };

    let mut ctx = RunContext::new();
    match runner::run(&cli.file, &reorderer, options, &mut ctx) {
        Ok(run) => {
            for line in report::success_lines(reorderer.profile(), &run) {
                println!("{line}");
            }
            Ok(())
        }
        Err(e) => {
            for line in report::failure_lines(reorderer.profile(), &e, ctx.failed_at()) {
                eprintln!("{line}");
            }
            Err(e).with_context(|| format!("Failed to reorder {}", cli.file.display()))
        }
    }
}
