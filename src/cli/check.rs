use std::path::Path;

use comfy_table::{Cell, Table};
use umya_spreadsheet::Worksheet;

use crate::cli::{open_workbook, settings_with_workbook};
use crate::error::Result;
use crate::locator::{locate_next_free_cell_in_column, locate_text_in_worksheet};
use crate::models::{CREDIT_LABEL, DEBIT_LABEL};

/// "B3 -> B9" for a label and its next free row, "missing" otherwise.
fn describe_block(ws: &Worksheet, label: &str) -> String {
    let Some(anchor) = locate_text_in_worksheet(ws, label) else {
        return "missing".to_string();
    };
    match locate_next_free_cell_in_column(ws, anchor) {
        Ok(free) => format!("{anchor} -> {free}"),
        Err(_) => format!("{anchor} -> full"),
    }
}

fn is_protected(ws: &Worksheet) -> bool {
    ws.get_sheet_protection()
        .map(|p| p.get_sheet().to_owned())
        .unwrap_or(false)
}

pub fn report(sheets: &[Worksheet]) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Sheet", "Paid in", "Paid out", "Protected"]);
    for ws in sheets {
        table.add_row(vec![
            Cell::new(ws.get_name()),
            Cell::new(describe_block(ws, CREDIT_LABEL)),
            Cell::new(describe_block(ws, DEBIT_LABEL)),
            Cell::new(if is_protected(ws) { "yes" } else { "no" }),
        ]);
    }
    table
}

pub fn run(config: &Path, workbook: Option<String>) -> Result<()> {
    let settings = settings_with_workbook(config, workbook)?;
    let path = settings.workbook_path()?;
    let book = open_workbook(&path)?;

    println!("{}", path.display());
    println!("{}", report(book.get_sheet_collection()));
    Ok(())
}
