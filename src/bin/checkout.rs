//! Checkout solver command line.
//!
//! Usage:
//!   checkout solve <SCORE> [--mode double_out] [--darts N] [--json] [--all]
//!   checkout table [--mode double_out] [--output FILE]
//!   checkout check <DART>... --score N [--mode double_out]
//!
//! Every subcommand accepts `--config <FILE>` with a JSON `CheckoutConfig`.
//! Set `RUST_LOG=debug` for diagnostic output.

use std::fs::File;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use darts_checkout_solver::checkout::{
    enumerate_with_darts, CheckoutConfig, CheckoutPath, CheckoutTable, DartThrow, GameMode, PathError, TableRow,
};
use darts_checkout_solver::input::parse_score;
use darts_checkout_solver::report::CheckoutReport;

#[derive(Debug, Parser)]
#[command(name = "checkout", version, about = "Lists every legal darts checkout for a remaining score.")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show every checkout for one score.
    Solve(SolveArgs),
    /// Build the full checkout table for a mode.
    Table(TableArgs),
    /// Check whether a given dart sequence is a legal checkout.
    Check(CheckArgs),
}

#[derive(Debug, Args)]
struct CommonArgs {
    /// Out-rule: single_out, double_out or master_out (default from config).
    #[arg(long, short)]
    mode: Option<GameMode>,

    /// JSON configuration file.
    #[arg(long, short)]
    config: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct SolveArgs {
    /// Remaining score.
    score: String,

    #[command(flatten)]
    common: CommonArgs,

    /// Darts left in the visit (1-3).
    #[arg(long, short)]
    darts: Option<usize>,

    /// Print the report as JSON.
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Show every path instead of truncating long buckets.
    #[arg(long, default_value_t = false)]
    all: bool,

    /// Also write the JSON report to this file.
    #[arg(long, short)]
    output: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct TableArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Write the table as JSON to this file.
    #[arg(long, short)]
    output: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct CheckArgs {
    /// Darts in throw order, e.g. T20 T20 DBULL.
    #[arg(required = true)]
    darts: Vec<DartThrow>,

    /// Remaining score before the first dart.
    #[arg(long, short)]
    score: String,

    #[command(flatten)]
    common: CommonArgs,
}

/// Table export.
#[derive(Debug, Serialize)]
struct TableOutput<'a> {
    mode: GameMode,
    max_darts: usize,
    bogey_numbers: Vec<u32>,
    rows: &'a [TableRow],
}

fn main() -> ExitCode {
    match real_main() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn real_main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Solve(args) => cmd_solve(args),
        Command::Table(args) => cmd_table(args),
        Command::Check(args) => cmd_check(args),
    }
}

fn load_config(common: &CommonArgs) -> anyhow::Result<(CheckoutConfig, GameMode)> {
    let config = match &common.config {
        Some(path) => CheckoutConfig::from_json_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => CheckoutConfig::default(),
    };
    let mode = common.mode.unwrap_or(config.mode);
    debug!(?config, %mode, "configuration resolved");
    Ok((config, mode))
}

fn cmd_solve(args: SolveArgs) -> anyhow::Result<ExitCode> {
    let (mut config, mode) = load_config(&args.common)?;
    if let Some(darts) = args.darts {
        config = config.with_max_darts(darts);
        config.validate()?;
    }
    if args.all {
        config = config.with_display_caps(usize::MAX, usize::MAX);
    }

    let score = parse_score(&args.score, &config).with_context(|| format!("invalid score {:?}", args.score))?;

    let start = Instant::now();
    let paths = enumerate_with_darts(score, mode, config.max_darts);
    debug!(score, %mode, paths = paths.len(), elapsed_us = start.elapsed().as_micros() as u64, "solved");

    let report = CheckoutReport::new(score, mode, &paths, &config);
    if args.json {
        println!("{}", report.to_json()?);
    } else {
        print!("{}", report.render_text());
    }

    if let Some(path) = &args.output {
        report
            .save_json(path)
            .with_context(|| format!("writing {}", path.display()))?;
        println!("Saved JSON: {}", path.display());
    }
    Ok(ExitCode::SUCCESS)
}

fn cmd_table(args: TableArgs) -> anyhow::Result<ExitCode> {
    let (config, mode) = load_config(&args.common)?;
    let start = Instant::now();

    let progress = ProgressBar::new(u64::from(config.max_score));
    progress.set_style(
        ProgressStyle::with_template("{spinner} [{bar:40}] {pos}/{len} scores")
            .context("progress template")?
            .progress_chars("=> "),
    );
    let table = CheckoutTable::build_with_progress(mode, &config, || progress.inc(1));
    progress.finish_and_clear();

    println!("=== Checkout table: {} ===", mode.display_name());
    println!("{:>5} {:>7} {:>7} {:>7} {:>5}", "score", "1-dart", "2-dart", "3-dart", "min");
    for row in table.summary().iter().filter(|r| r.total() > 0) {
        let min = row.min_darts.map(|d| d.to_string()).unwrap_or_else(|| "-".to_string());
        println!("{:>5} {:>7} {:>7} {:>7} {:>5}", row.score, row.one_dart, row.two_dart, row.three_dart, min);
    }

    let bogeys = table.bogey_numbers();
    println!("\nNo checkout: {:?}", bogeys);
    println!("Built in {:.2}s", start.elapsed().as_secs_f64());

    if let Some(path) = &args.output {
        let output = TableOutput {
            mode,
            max_darts: table.max_darts(),
            bogey_numbers: bogeys,
            rows: table.summary(),
        };
        let json = serde_json::to_string_pretty(&output)?;
        File::create(path)
            .and_then(|mut f| f.write_all(json.as_bytes()))
            .with_context(|| format!("writing {}", path.display()))?;
        println!("Saved JSON: {}", path.display());
    }
    Ok(ExitCode::SUCCESS)
}

/// Exit code when the darts are well formed but do not check out.
const EXIT_NOT_A_CHECKOUT: u8 = 2;

fn cmd_check(args: CheckArgs) -> anyhow::Result<ExitCode> {
    let (config, mode) = load_config(&args.common)?;
    let score = parse_score(&args.score, &config).with_context(|| format!("invalid score {:?}", args.score))?;

    let (message, code) = check_outcome(args.darts, score, mode)?;
    println!("{}", message);
    Ok(ExitCode::from(code))
}

/// Verdict line and exit code for `check`. A bad dart count is an error.
fn check_outcome(darts: Vec<DartThrow>, score: u32, mode: GameMode) -> anyhow::Result<(String, u8)> {
    let method = darts.iter().map(|d| d.label()).collect::<Vec<_>>().join(" ");
    match CheckoutPath::check(darts, score, mode) {
        Ok(path) => Ok((format!("{} checks out {} ({})", path, score, mode.display_name()), 0)),
        Err(e @ PathError::DartCount(_)) => bail!(e),
        Err(e) => Ok((format!("{} does not check out {}: {}", method, score, e), EXIT_NOT_A_CHECKOUT)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn darts(labels: &[&str]) -> Vec<DartThrow> {
        labels.iter().map(|l| l.parse().unwrap()).collect()
    }

    #[test]
    fn test_check_outcome_codes() {
        let (message, code) = check_outcome(darts(&["T20", "T20", "DBULL"]), 170, GameMode::DoubleOut).unwrap();
        assert_eq!(code, 0);
        assert_eq!(message, "T20 T20 DBULL checks out 170 (Double Out)");

        let (message, code) = check_outcome(darts(&["BULL", "BULL"]), 50, GameMode::DoubleOut).unwrap();
        assert_eq!(code, EXIT_NOT_A_CHECKOUT);
        assert!(message.starts_with("BULL BULL does not check out 50"), "{}", message);

        let (_, code) = check_outcome(darts(&["S20", "D10"]), 41, GameMode::DoubleOut).unwrap();
        assert_eq!(code, EXIT_NOT_A_CHECKOUT);
    }

    #[test]
    fn test_check_outcome_rejects_dart_count() {
        let err = check_outcome(darts(&["S1", "S1", "S1", "S1"]), 4, GameMode::SingleOut).unwrap_err();
        assert_eq!(err.to_string(), "a checkout needs 1 to 3 darts, got 4");
    }
}
