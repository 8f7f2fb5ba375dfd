use std::collections::BTreeMap;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use colored::Colorize;
use comfy_table::{Cell, CellAlignment, Table};

use crate::cli::{open_workbook, save_workbook, settings_with_workbook};
use crate::error::{Result, YearendError};
use crate::fmt::amount;
use crate::importer::TransactionReader;
use crate::models::{Block, Transaction};
use crate::settings::shellexpand_path;
use crate::writer::{Placement, TransactionWriter};

#[derive(Debug, Default, Clone, PartialEq)]
pub struct SheetTotals {
    pub credits: usize,
    pub debits: usize,
    pub paid_in: f64,
    pub paid_out: f64,
}

#[derive(Debug, Default)]
pub struct ImportSummary {
    pub sheets: BTreeMap<String, SheetTotals>,
    pub skipped: Vec<String>,
}

impl ImportSummary {
    pub fn record(&mut self, placement: &Placement, txn: &Transaction) {
        let totals = self.sheets.entry(placement.sheet.clone()).or_default();
        match placement.block {
            Block::Credit => {
                totals.credits += 1;
                totals.paid_in += txn.amount;
            }
            Block::Debit => {
                totals.debits += 1;
                totals.paid_out += -txn.amount;
            }
        }
    }

    pub fn written(&self) -> usize {
        self.sheets.values().map(|t| t.credits + t.debits).sum()
    }

    pub fn table(&self) -> Table {
        let mut table = Table::new();
        table.set_header(vec!["Sheet", "Paid in", "Amount in", "Paid out", "Amount out"]);
        for (sheet, t) in &self.sheets {
            table.add_row(vec![
                Cell::new(sheet),
                Cell::new(t.credits).set_alignment(CellAlignment::Right),
                Cell::new(amount(t.paid_in)).set_alignment(CellAlignment::Right),
                Cell::new(t.debits).set_alignment(CellAlignment::Right),
                Cell::new(amount(t.paid_out)).set_alignment(CellAlignment::Right),
            ]);
        }
        table
    }
}

/// Printed for every parsed record, before it is placed.
fn echo_line(txn: &Transaction) -> String {
    format!("{}_{}_{}", txn.date, txn.payee, txn.amount)
}

/// Errors that only affect one line and can be skipped in lenient mode.
fn is_line_error(e: &YearendError) -> bool {
    matches!(
        e,
        YearendError::Parse { .. }
            | YearendError::Csv(_)
            | YearendError::SheetNotFound(_)
            | YearendError::LabelNotFound { .. }
            | YearendError::BlockFull(_)
    )
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (std::fs::canonicalize(a), std::fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

pub fn run(
    config: &Path,
    transactions: Option<String>,
    workbook: Option<String>,
    output: Option<String>,
    lenient: bool,
) -> Result<()> {
    let settings = settings_with_workbook(config, workbook)?;
    let txn_path = PathBuf::from(shellexpand_path(
        transactions.as_deref().unwrap_or(&settings.transaction.filename),
    ));
    let book_path = settings.workbook_path()?;
    let save_path = PathBuf::from(shellexpand_path(
        output.as_deref().unwrap_or(&settings.spreadsheet.save_filename),
    ));

    if same_file(&book_path, &save_path) {
        log::warn!("output is the input workbook");
        eprintln!(
            "{} saving over {}; an aborted run leaves it untouched, a finished one replaces it.",
            "Warning:".yellow().bold(),
            book_path.display()
        );
    }

    let mut book = open_workbook(&book_path)?;
    log::info!("reading transactions {}", txn_path.display());
    let file = std::fs::File::open(&txn_path)?;
    let reader = TransactionReader::new(BufReader::new(file), &settings)?;
    log::debug!("columns {:?}", reader.meta());
    let writer = TransactionWriter::new(&settings);

    let mut summary = ImportSummary::default();
    for item in reader {
        let result = item.and_then(|(line, txn)| {
            println!("{}", echo_line(&txn));
            writer
                .write(&mut book, &txn)
                .map(|placement| (line, txn, placement))
        });
        match result {
            Ok((line, txn, placement)) => {
                log::debug!("line {line} -> '{}' {}", placement.sheet, placement.address);
                summary.record(&placement, &txn);
            }
            Err(e) if lenient && is_line_error(&e) => {
                log::warn!("skipped: {e}");
                eprintln!("{} {e}", "Skipped:".yellow());
                summary.skipped.push(e.to_string());
            }
            Err(e) => return Err(e),
        }
    }

    if !summary.sheets.is_empty() {
        println!("{}", summary.table());
    }
    save_workbook(&book, &save_path)?;

    println!(
        "{} written, {} skipped, saved to {}",
        summary.written(),
        summary.skipped.len(),
        save_path.display()
    );
    Ok(())
}
