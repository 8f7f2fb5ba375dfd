use std::fmt;
use std::str::FromStr;

use crate::error::{Result, YearendError};

/// A 1-based (column, row) position in a worksheet, e.g. `C12` = (3, 12).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellAddress {
    pub col: u32,
    pub row: u32,
}

impl CellAddress {
    pub fn new(col: u32, row: u32) -> Self {
        Self { col, row }
    }

    pub fn next_row(self, incr: u32) -> Self {
        Self::new(self.col, self.row + incr)
    }

    pub fn next_col(self, incr: u32) -> Self {
        Self::new(self.col + incr, self.row)
    }

    /// Coordinate tuple in the (column, row) order umya-spreadsheet expects.
    pub fn coords(self) -> (u32, u32) {
        (self.col, self.row)
    }
}

impl fmt::Display for CellAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_cell_address(self.col, self.row))
    }
}

impl FromStr for CellAddress {
    type Err = YearendError;

    fn from_str(s: &str) -> Result<Self> {
        let (col, row) = parse_cell_address(s)?;
        Ok(Self::new(col, row))
    }
}

/// Bijective base-26: 1 -> A, 26 -> Z, 27 -> AA.
pub fn column_letters(mut col: u32) -> String {
    let mut letters = Vec::new();
    while col > 0 {
        let rem = (col - 1) % 26;
        letters.push(b'A' + rem as u8);
        col = (col - 1) / 26;
    }
    letters.reverse();
    String::from_utf8(letters).unwrap_or_default()
}

pub fn column_index(letters: &str) -> Option<u32> {
    if letters.is_empty() {
        return None;
    }
    letters.chars().try_fold(0u32, |acc, c| {
        if !c.is_ascii_alphabetic() {
            return None;
        }
        let digit = c.to_ascii_uppercase() as u32 - 'A' as u32 + 1;
        acc.checked_mul(26)?.checked_add(digit)
    })
}

pub fn parse_cell_address(addr: &str) -> Result<(u32, u32)> {
    let invalid = || YearendError::InvalidAddress(addr.to_string());
    let split = addr
        .find(|c: char| c.is_ascii_digit())
        .ok_or_else(invalid)?;
    let (letters, digits) = addr.split_at(split);
    let col = column_index(letters).ok_or_else(invalid)?;
    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid());
    }
    let row: u32 = digits.parse().map_err(|_| invalid())?;
    if row == 0 {
        return Err(invalid());
    }
    Ok((col, row))
}

pub fn format_cell_address(col: u32, row: u32) -> String {
    format!("{}{row}", column_letters(col))
}
