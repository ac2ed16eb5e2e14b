mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::sensitivity::SensitivityArgs;
use commands::simulate::{SimulateArgs, ThresholdsArgs};

/// Unit economics and viability assessment for early-stage businesses
#[derive(Parser)]
#[command(
    name = "uecon",
    version,
    about = "Unit economics and viability assessment",
    long_about = "Derives unit margin, revenue, profit, LTV, CAC and break-even from a handful \
                  of business inputs, classifies profitability and acquisition health, and \
                  ranks recommendations. All arithmetic uses decimal precision."
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
    /// Run a viability assessment
    Simulate(SimulateArgs),
    /// Sweep one input across a range and re-assess at each point
    Sensitivity(SensitivityArgs),
    /// Print the default health thresholds
    Thresholds(ThresholdsArgs),
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
    env_logger::init();
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Simulate(args) => commands::simulate::run_simulate(args),
        Commands::Sensitivity(args) => commands::sensitivity::run_sensitivity(args),
        Commands::Thresholds(args) => commands::simulate::run_thresholds(args),
        Commands::Version => {
            println!(
                "uecon {} (calculation {})",
                env!("CARGO_PKG_VERSION"),
                unit_economics_core::simulation::CALCULATION_VERSION
            );
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
