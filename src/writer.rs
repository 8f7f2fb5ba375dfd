use std::fmt::Write as _;

use chrono::NaiveDate;
use umya_spreadsheet::{Spreadsheet, Worksheet};

use crate::address::CellAddress;
use crate::categorizer::CategoryMap;
use crate::error::{Result, YearendError};
use crate::locator::locate_next_free_row_in_range;
use crate::models::{Block, Transaction};
use crate::settings::Settings;

/// Where a transaction ended up.
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    pub sheet: String,
    pub block: Block,
    pub address: CellAddress,
    pub category: Option<String>,
}

pub fn format_date(date: NaiveDate, format: &str) -> Result<String> {
    let mut out = String::new();
    write!(out, "{}", date.format(format)).map_err(|_| {
        YearendError::Settings(format!("cannot format date {date} with {format:?}"))
    })?;
    Ok(out)
}

pub struct TransactionWriter<'a> {
    settings: &'a Settings,
    categories: CategoryMap,
}

impl<'a> TransactionWriter<'a> {
    pub fn new(settings: &'a Settings) -> Self {
        let categories = CategoryMap::new(&settings.category_mapping);
        log::info!("{} category mappings", categories.len());
        Self {
            settings,
            categories,
        }
    }

    pub fn sheet_name(&self, date: NaiveDate) -> Result<String> {
        format_date(date, &self.settings.spreadsheet.sheet_name_format)
    }

    pub fn write(&self, book: &mut Spreadsheet, txn: &Transaction) -> Result<Placement> {
        let sheet = self.sheet_name(txn.date)?;
        let ws = book
            .get_sheet_by_name_mut(&sheet)
            .ok_or_else(|| YearendError::SheetNotFound(sheet.clone()))?;
        unprotect(ws);

        let block = Block::for_amount(txn.amount);
        let address = locate_next_free_row_in_range(ws, block.label())?;
        let date = format_date(txn.date, &self.settings.spreadsheet.date_format)?;
        let category = self.categories.lookup(&txn.payee).map(str::to_string);

        ws.get_cell_mut(address.coords()).set_value_string(date);
        ws.get_cell_mut(address.next_col(1).coords())
            .set_value_string(txn.payee.as_str());
        match block {
            Block::Credit => {
                ws.get_cell_mut(address.next_col(3).coords())
                    .set_value_number(txn.amount);
                if let Some(cat) = &category {
                    ws.get_cell_mut(address.next_col(4).coords())
                        .set_value_string(cat.as_str());
                }
            }
            Block::Debit => {
                if let Some(cat) = &category {
                    ws.get_cell_mut(address.next_col(2).coords())
                        .set_value_string(cat.as_str());
                }
                ws.get_cell_mut(address.next_col(3).coords())
                    .set_value_number(-txn.amount);
            }
        }
        log::debug!("'{sheet}' {} row at {address}", block.name());

        Ok(Placement {
            sheet,
            block,
            address,
            category,
        })
    }
}

fn unprotect(ws: &mut Worksheet) {
    if ws.get_sheet_protection().is_some() {
        ws.get_sheet_protection_mut().set_sheet(false);
    }
}
