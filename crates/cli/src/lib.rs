pub mod commands;
pub mod logging;

use clap::{Parser, Subcommand};
use salespulse_core::config::{AppConfig, LoadOptions};
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(
    name = "salespulse",
    about = "SalesPulse analytics CLI",
    long_about = "Inspect the demo catalog, generate synthetic sales with revenue aggregates, and request model-backed insights and recommendations.",
    after_help = "Examples:\n  salespulse sales --seed 7\n  salespulse insights --count 50\n  salespulse predict --customer c1"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "List catalog products, customers and categories")]
    Catalog,
    #[command(about = "Generate synthetic sales and print revenue summary, daily and category totals")]
    Sales {
        #[arg(long, help = "Number of sales to generate (defaults to generator.sale_count)")]
        count: Option<usize>,
        #[arg(long, help = "Seed for reproducible generation")]
        seed: Option<u64>,
        #[arg(long, help = "Include the generated sale records in the output")]
        records: bool,
    },
    #[command(about = "Generate synthetic sales and ask the model for trend insights")]
    Insights {
        #[arg(long, help = "Number of sales to generate (defaults to generator.sale_count)")]
        count: Option<usize>,
        #[arg(long, help = "Seed for reproducible generation")]
        seed: Option<u64>,
    },
    #[command(about = "Ask the model for the next likely purchases of a customer")]
    Predict {
        #[arg(long, help = "Customer id, for example c1")]
        customer: String,
    },
    #[command(about = "Inspect effective configuration values with source attribution and redaction")]
    Config,
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    if let Ok(config) = AppConfig::load(LoadOptions::default()) {
        logging::init(&config.logging);
    }

    let result = match cli.command {
        Command::Catalog => commands::catalog::run(),
        Command::Sales { count, seed, records } => commands::sales::run(count, seed, records),
        Command::Insights { count, seed } => commands::insights::run(count, seed),
        Command::Predict { customer } => commands::predict::run(&customer),
        Command::Config => commands::config::run(),
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}
