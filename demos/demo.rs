//! Demo application that races every strategy and reports the damage.
//!
//! Run with:
//! ```bash
//! cargo run --example demo --features demo -- --iterations 1000000
//! ```

use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use contesa::analysis::TrialResult;
use contesa::counters::Strategy;
use contesa::harness::run_trial;
use contesa::report::json::JsonReport;
use contesa::report::table::{TableReport, TableStyle};

/// Output format for the final report.
#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    /// Pretty ASCII table
    #[default]
    Table,
    /// JSON array of result records
    Json,
}

/// Table style selection.
#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum StyleChoice {
    Ascii,
    #[default]
    Rounded,
    Sharp,
    Markdown,
    Blank,
}

impl From<StyleChoice> for TableStyle {
    fn from(choice: StyleChoice) -> Self {
        match choice {
            StyleChoice::Ascii => TableStyle::Ascii,
            StyleChoice::Rounded => TableStyle::Rounded,
            StyleChoice::Sharp => TableStyle::Sharp,
            StyleChoice::Markdown => TableStyle::Markdown,
            StyleChoice::Blank => TableStyle::Blank,
        }
    }
}

/// Demo application for contesa: race two workers against each counter
/// strategy and report intersections, collisions and elapsed time.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Iterations each of the two workers performs per trial
    #[arg(short, long, default_value_t = 1_000_000, value_parser = clap::value_parser!(u64).range(1..))]
    iterations: u64,

    /// Strategies to run (default: all six, flawed ones first)
    #[arg(short, long, value_enum)]
    strategy: Vec<Strategy>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    format: OutputFormat,

    /// Table style (for table format)
    #[arg(long, value_enum, default_value = "rounded")]
    style: StyleChoice,

    /// Pretty print JSON output
    #[arg(long)]
    pretty: bool,
}

/// Renders whatever results were gathered, even after a failed trial.
fn render(args: &Args, results: &[TrialResult]) {
    if results.is_empty() {
        return;
    }
    match args.format {
        OutputFormat::Table => {
            let report = TableReport::new().with_style(args.style.into());
            println!("{}", report.render(results));
        }
        OutputFormat::Json => {
            let report = JsonReport::new().pretty(args.pretty);
            match report.to_json(results) {
                Ok(json) => println!("{json}"),
                Err(e) => eprintln!("error: {e}"),
            }
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    let strategies: Vec<Strategy> = if args.strategy.is_empty() {
        Strategy::ALL.to_vec()
    } else {
        args.strategy.clone()
    };
    let iterations = args.iterations as usize;

    let mut results = Vec::with_capacity(strategies.len());
    for strategy in strategies {
        eprintln!("running {strategy} with 2 x {iterations} iterations...");
        match run_trial(strategy, iterations) {
            Ok(result) => {
                eprintln!(
                    "  {} strategy {} ({} intersections, {}/{} collisions, {} ms)",
                    result.strategy(),
                    result.verdict(),
                    result.analysis().intersections,
                    result.analysis().collisions_a,
                    result.analysis().collisions_b,
                    result.elapsed().as_millis()
                );
                results.push(result);
            }
            Err(e) => {
                // A failed trial ends the run, but results already gathered
                // from earlier strategies are still reported.
                eprintln!("error: trial for {strategy} failed: {e}");
                render(&args, &results);
                return ExitCode::FAILURE;
            }
        }
    }

    render(&args, &results);
    ExitCode::SUCCESS
}
