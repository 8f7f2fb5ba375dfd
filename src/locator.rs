use umya_spreadsheet::Worksheet;

use crate::address::CellAddress;
use crate::error::{Result, YearendError};

/// Labels are only searched for in columns A..T.
pub const SCAN_COLUMNS: u32 = 20;

/// Last row an xlsx sheet can hold.
pub const MAX_ROW: u32 = 1_048_576;

/// A cell holding a formula is taken even when its cached value is empty.
fn is_occupied(ws: &Worksheet, addr: CellAddress) -> bool {
    ws.get_cell(addr.coords())
        .map(|cell| cell.is_formula() || !cell.get_value().is_empty())
        .unwrap_or(false)
}

fn cell_text(ws: &Worksheet, addr: CellAddress) -> Option<String> {
    let value = ws.get_cell(addr.coords())?.get_value();
    if value.is_empty() {
        None
    } else {
        Some(value.into_owned())
    }
}

/// Column by column, top to bottom: the first cell whose value is exactly `text`.
pub fn locate_text_in_worksheet(ws: &Worksheet, text: &str) -> Option<CellAddress> {
    let highest_row = ws.get_highest_row();
    for col in 1..=SCAN_COLUMNS {
        for row in 1..=highest_row {
            let addr = CellAddress::new(col, row);
            if cell_text(ws, addr).as_deref() == Some(text) {
                return Some(addr);
            }
        }
    }
    None
}

pub fn locate_next_free_cell_in_column(ws: &Worksheet, start: CellAddress) -> Result<CellAddress> {
    let mut addr = start;
    while is_occupied(ws, addr) {
        if addr.row >= MAX_ROW {
            return Err(YearendError::BlockFull(format!("{} in '{}'", start, ws.get_name())));
        }
        addr = addr.next_row(1);
    }
    Ok(addr)
}

pub fn locate_next_free_row_in_range(ws: &Worksheet, label: &str) -> Result<CellAddress> {
    let anchor = locate_text_in_worksheet(ws, label).ok_or_else(|| YearendError::LabelNotFound {
        sheet: ws.get_name().to_string(),
        label: label.to_string(),
    })?;
    let free = locate_next_free_cell_in_column(ws, anchor)?;
    log::debug!("'{}': {label} at {anchor}, next free {free}", ws.get_name());
    Ok(free)
}
