use std::io::{BufRead, Lines};

use chrono::{NaiveDate, NaiveDateTime};
use csv::StringRecord;

use crate::error::{Result, YearendError};
use crate::models::Transaction;
use crate::settings::Settings;

// ---------------------------------------------------------------------------
// Header
// ---------------------------------------------------------------------------

/// Positions of the required columns within the header line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMeta {
    pub date: usize,
    pub payee: usize,
    pub amount: usize,
}

impl ColumnMeta {
    pub fn from_header(header: &StringRecord) -> Result<Self> {
        let find = |name: &'static str| {
            header
                .iter()
                .position(|f| f == name)
                .ok_or(YearendError::MissingColumn(name))
        };
        Ok(Self {
            date: find("Date")?,
            payee: find("Payee")?,
            amount: find("Amount")?,
        })
    }

    fn min_fields(&self) -> usize {
        self.date.max(self.payee).max(self.amount) + 1
    }
}

// ---------------------------------------------------------------------------
// Field helpers
// ---------------------------------------------------------------------------

pub fn parse_amount(raw: &str) -> Option<f64> {
    let s = raw.replace(',', "").replace('"', "").replace(['$', '£'], "");
    let s = s.trim();
    if let Some(inner) = s.strip_prefix('(').and_then(|v| v.strip_suffix(')')) {
        return inner.trim().parse::<f64>().ok().filter(|v| v.is_finite()).map(|v| -v);
    }
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Accepts date-only formats and formats carrying a time of day.
pub fn parse_date(raw: &str, format: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, format)
        .ok()
        .or_else(|| NaiveDateTime::parse_from_str(raw, format).ok().map(|dt| dt.date()))
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

pub fn parse_record(
    record: &StringRecord,
    meta: &ColumnMeta,
    settings: &Settings,
    line: u64,
) -> Result<Transaction> {
    let parse_err = |message: String| YearendError::Parse { line, message };

    if record.len() < meta.min_fields() {
        return Err(parse_err(format!(
            "expected at least {} fields, found {}",
            meta.min_fields(),
            record.len()
        )));
    }

    let raw_date = &record[meta.date];
    let date = parse_date(raw_date, &settings.transaction.date_format).ok_or_else(|| {
        parse_err(format!(
            "date {raw_date:?} does not match format {:?}",
            settings.transaction.date_format
        ))
    })?;
    let payee = record[meta.payee].to_string();
    let raw_amount = &record[meta.amount];
    let amount = parse_amount(raw_amount)
        .ok_or_else(|| parse_err(format!("amount {raw_amount:?} is not a number")))?;

    Ok(Transaction {
        date,
        payee,
        amount,
    })
}

/// Streams a transaction log: the first non-blank line is the header, every
/// following non-blank line one transaction. Items carry the 1-based physical
/// line number, blank lines included.
pub struct TransactionReader<R: BufRead> {
    lines: Lines<R>,
    line_no: u64,
    splitter: csv::ReaderBuilder,
    meta: ColumnMeta,
    settings: Settings,
}

impl<R: BufRead> TransactionReader<R> {
    pub fn new(input: R, settings: &Settings) -> Result<Self> {
        let mut splitter = csv::ReaderBuilder::new();
        splitter
            .has_headers(false)
            .flexible(true)
            .quoting(false)
            .delimiter(settings.separator_byte()?);

        let mut lines = input.lines();
        let mut line_no = 0;
        let header = loop {
            let Some(line) = lines.next() else {
                return Err(YearendError::EmptyTransactions);
            };
            line_no += 1;
            let line = line?;
            if !line.trim().is_empty() {
                break split_line(&splitter, line.trim())?;
            }
        };
        let meta = ColumnMeta::from_header(&header)?;

        Ok(Self {
            lines,
            line_no,
            splitter,
            meta,
            settings: settings.clone(),
        })
    }

    pub fn meta(&self) -> ColumnMeta {
        self.meta
    }
}

/// Fields of one line, split on the separator only; quotes are literal text.
fn split_line(splitter: &csv::ReaderBuilder, line: &str) -> Result<StringRecord> {
    let mut record = StringRecord::new();
    splitter.from_reader(line.as_bytes()).read_record(&mut record)?;
    Ok(record)
}

impl<R: BufRead> Iterator for TransactionReader<R> {
    type Item = Result<(u64, Transaction)>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(e) => return Some(Err(e.into())),
            };
            self.line_no += 1;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let line_no = self.line_no;
            return Some(
                split_line(&self.splitter, line)
                    .and_then(|record| parse_record(&record, &self.meta, &self.settings, line_no))
                    .map(|txn| (line_no, txn)),
            );
        }
    }
}
