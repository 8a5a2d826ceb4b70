mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::export::ExportArgs;
use commands::query::{AggregateArgs, CrosstabArgs, ListArgs, TopArgs};
use commands::summary::SummaryArgs;

/// Debtor portfolio queries and reports over a Flowen CSV dataset
#[derive(Parser)]
#[command(
    name = "flowen",
    version,
    about = "Debtor portfolio queries and reports",
    long_about = "Load a debtor dataset from CSV and run filtered listings, grouped \
                  aggregations, cross tabulations, top-N rankings, portfolio \
                  summaries, and delimited or paginated document exports."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to the debtor dataset CSV
    #[arg(long, global = true, default_value = "flowen_debtors.csv")]
    data: String,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Portfolio KPI summary (totals, mean risk score, high-risk share)
    Summary(SummaryArgs),
    /// List records matching the filter
    List(ListArgs),
    /// Grouped count/mean/sum over a field
    Aggregate(AggregateArgs),
    /// Two-key cross tabulation (e.g. contact channel x response behavior)
    Crosstab(CrosstabArgs),
    /// Top-N accounts by a numeric field
    Top(TopArgs),
    /// Export filtered records as CSV or a paginated document
    Export(ExportArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Summary(args) => commands::summary::run_summary(&cli.data, args),
        Commands::List(args) => commands::query::run_list(&cli.data, args),
        Commands::Aggregate(args) => commands::query::run_aggregate(&cli.data, args),
        Commands::Crosstab(args) => commands::query::run_crosstab(&cli.data, args),
        Commands::Top(args) => commands::query::run_top(&cli.data, args),
        Commands::Export(args) => commands::export::run_export(&cli.data, args),
        Commands::Version => {
            println!("flowen {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            // Exports that already streamed bytes to stdout return Null.
            if !value.is_null() {
                output::format_output(&cli.output, &value);
            }
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
