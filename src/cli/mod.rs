pub mod check;
pub mod import;
pub mod init;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use umya_spreadsheet::Spreadsheet;

use crate::error::{Result, YearendError};
use crate::settings::{load_settings, Settings, DEFAULT_CONFIG_FILE};

#[derive(Parser)]
#[command(
    name = "yearend",
    about = "Post a bank transaction log into the monthly sheets of an accounts workbook."
)]
pub struct Cli {
    /// More output (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write every transaction into the workbook and save it under a new name.
    Import {
        /// Config file
        #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
        config: PathBuf,
        /// Transaction log (overrides transaction.filename)
        #[arg(long)]
        transactions: Option<String>,
        /// Workbook to read (overrides spreadsheet.filename)
        #[arg(long)]
        workbook: Option<String>,
        /// Where to save (overrides spreadsheet.save_filename)
        #[arg(long)]
        output: Option<String>,
        /// Skip lines that fail to parse or place instead of aborting
        #[arg(long)]
        lenient: bool,
    },
    /// Show where each worksheet's PAID IN / PAID OUT blocks are and their next free row.
    Check {
        /// Config file
        #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
        config: PathBuf,
        /// Workbook to inspect (overrides spreadsheet.filename)
        #[arg(long)]
        workbook: Option<String>,
    },
    /// Write a starter config file.
    Init {
        /// Where to write it
        #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
        config: PathBuf,
    },
}

/// Loads the config and applies a `--workbook` override.
pub(crate) fn settings_with_workbook(config: &Path, workbook: Option<String>) -> Result<Settings> {
    let mut settings = load_settings(config)?;
    if workbook.is_some() {
        settings.spreadsheet.filename = workbook;
    }
    Ok(settings)
}

pub(crate) fn open_workbook(path: &Path) -> Result<Spreadsheet> {
    log::info!("reading workbook {}", path.display());
    umya_spreadsheet::reader::xlsx::read(path).map_err(|e| {
        YearendError::Workbook(format!("failed to open {}: {e}", path.display()))
    })
}

pub(crate) fn save_workbook(book: &Spreadsheet, path: &Path) -> Result<()> {
    log::info!("saving workbook {}", path.display());
    umya_spreadsheet::writer::xlsx::write(book, path).map_err(|e| {
        YearendError::Workbook(format!("failed to save {}: {e}", path.display()))
    })
}
