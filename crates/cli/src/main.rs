//! `cyretry` — re-run the Cypress tests that failed in the previous run.
//!
//! Reads the failure ledger written during the last recording run, derives
//! a title-match expression and a spec-file restriction from it, and hands
//! both to the external runner. Exit codes: 0 when there is nothing to
//! retry or the retried tests pass; the runner's own exit code when tests
//! fail again; 1 for a corrupt ledger or a runner that could not be
//! launched.

mod color;

use anyhow::{Context, Result};
use clap::Parser;
use color::{ColorMode, Paint};
use cyretry_ledger::{FsLedger, DEFAULT_LEDGER_PATH};
use cyretry_retry::{plan, run_retry, RetryPlan, RunnerConfig};
use std::path::PathBuf;
use std::process;

#[derive(Debug, Parser)]
#[command(
    name = "cyretry",
    about = "Re-run the Cypress tests that failed in the previous run",
    version
)]
struct Args {
    /// Path of the failure ledger
    #[arg(long, default_value = DEFAULT_LEDGER_PATH)]
    ledger: PathBuf,

    /// Program used to launch the test runner
    #[arg(long, default_value = "yarn")]
    runner: String,

    /// When to color status output
    #[arg(long, value_enum, default_value = "auto")]
    color: ColorMode,

    /// Extra arguments forwarded verbatim to the runner invocation
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    runner_args: Vec<String>,
}

fn main() {
    // Library logging goes to stderr; status lines own stdout.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let paint = Paint::new(args.color);

    match run(&args, &paint) {
        Ok(code) => process::exit(code),
        Err(err) => {
            eprintln!("{}", paint.red(&format!("cyretry: error: {err:#}")));
            process::exit(1);
        }
    }
}

fn run(args: &Args, paint: &Paint) -> Result<i32> {
    let store = FsLedger::new(&args.ledger);

    let retry_plan = plan(&store).context("could not read the failure ledger")?;
    let selection = match retry_plan {
        RetryPlan::NothingToRetry => {
            println!(
                "{}",
                paint.green("no failure ledger found, everything passed previously")
            );
            return Ok(0);
        }
        RetryPlan::NoFailuresRecorded => {
            println!("{}", paint.green("no failures recorded"));
            return Ok(0);
        }
        RetryPlan::Retry(selection) => selection,
    };

    println!(
        "{}",
        paint.yellow(&format!(
            "found {} failed tests, retrying",
            selection.failure_count
        ))
    );
    println!(
        "{}",
        paint.blue(&format!("targeting specs: {}", selection.spec_arg()))
    );

    let config = RunnerConfig::new()
        .program(&args.runner)
        .ledger_path(&args.ledger);
    println!(
        "{}",
        paint.gray(&format!(
            "running: {}",
            config.render(&selection, &args.runner_args)
        ))
    );

    let code = run_retry(&config, &selection, &args.runner_args)?;
    Ok(code)
}
