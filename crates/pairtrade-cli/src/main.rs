mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::coint::CointArgs;
use commands::evaluate::EvaluateArgs;

/// Cointegration-tested pairs trading signal analysis
#[derive(Parser)]
#[command(
    name = "pairtrade",
    version,
    about = "Cointegration-tested pairs trading signal analysis",
    long_about = "Fetches two adjusted-close series, tests them for cointegration \
                  (Engle-Granger), and — when the pair qualifies — derives a z-scored \
                  spread signal and the strategy's cumulative returns."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full pipeline: cointegration gate, spread signal, returns
    Evaluate(EvaluateArgs),
    /// Run only the cointegration test on a pair
    Coint(CointArgs),
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
        Commands::Evaluate(args) => commands::evaluate::run_evaluate(args),
        Commands::Coint(args) => commands::coint::run_coint(args),
        Commands::Version => {
            println!("pairtrade {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
