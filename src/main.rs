mod address;
mod categorizer;
mod cli;
mod error;
mod fmt;
mod importer;
mod locator;
mod models;
mod settings;
mod writer;

use clap::Parser;
use colored::Colorize;

use cli::{Cli, Commands};

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Import {
            config,
            transactions,
            workbook,
            output,
            lenient,
        } => cli::import::run(&config, transactions, workbook, output, lenient),
        Commands::Check { config, workbook } => cli::check::run(&config, workbook),
        Commands::Init { config } => cli::init::run(&config),
    };

    if let Err(e) = result {
        eprintln!("{} {e}", "Error:".red().bold());
        std::process::exit(1);
    }
}
