//! The main entry point for the `linkswap` command-line application.
//!
//! Logging: set `RUST_LOG=linkswap=debug` (or pass `--verbose`) to see
//! diagnostics on stderr. Progress and the summary always go to stdout.

use linkswap::cli;
use linkswap::config::Settings;
use linkswap::confirm::LineConfirmation;
use linkswap::errors::Result;
use linkswap::replacer;
use std::env;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let args = cli::parse_args();

    // RUST_LOG overrides; --verbose => debug; else warnings only
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if args.verbose {
            "linkswap=debug"
        } else {
            "linkswap=warn"
        })
    });
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("❌ FATAL ERROR: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &cli::Args) -> Result<()> {
    let working_dir = env::current_dir()?;
    let settings = Settings::resolve(args, &working_dir)?;
    let mut confirm = LineConfirmation::stdio();

    let status = replacer::run_replace(&settings, &mut confirm)?;
    tracing::debug!(?status, "run finished");
    Ok(())
}
