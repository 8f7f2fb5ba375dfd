use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};

use crate::error::{Result, YearendError};

pub const DEFAULT_CONFIG_FILE: &str = "yearend.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub transaction: TransactionSettings,
    pub spreadsheet: SpreadsheetSettings,
    #[serde(default)]
    pub category_mapping: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionSettings {
    pub separator: String,
    pub date_format: String,
    pub filename: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpreadsheetSettings {
    /// Workbook to read. May be left out when `--workbook` is passed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    pub sheet_name_format: String,
    pub date_format: String,
    pub save_filename: String,
}

impl Default for Settings {
    fn default() -> Self {
        let mut category_mapping = BTreeMap::new();
        category_mapping.insert("TescoSuperstore".to_string(), "Groceries".to_string());
        Self {
            transaction: TransactionSettings {
                separator: "|".to_string(),
                date_format: "%d/%m/%Y".to_string(),
                filename: "transactions.txt".to_string(),
            },
            spreadsheet: SpreadsheetSettings {
                filename: Some("accounts.xlsx".to_string()),
                sheet_name_format: "%b %Y".to_string(),
                date_format: "%d/%m/%Y".to_string(),
                save_filename: "accounts-updated.xlsx".to_string(),
            },
            category_mapping,
        }
    }
}

impl Settings {
    pub fn separator_byte(&self) -> Result<u8> {
        match self.transaction.separator.as_bytes() {
            [b] if b.is_ascii() => Ok(*b),
            _ => Err(YearendError::Settings(format!(
                "transaction.separator must be a single ASCII character, got {:?}",
                self.transaction.separator
            ))),
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.separator_byte()?;
        for (key, fmt) in [
            ("transaction.date_format", &self.transaction.date_format),
            ("spreadsheet.sheet_name_format", &self.spreadsheet.sheet_name_format),
            ("spreadsheet.date_format", &self.spreadsheet.date_format),
        ] {
            if fmt.is_empty() || StrftimeItems::new(fmt).any(|item| item == Item::Error) {
                return Err(YearendError::Settings(format!(
                    "{key} is not a valid date format: {fmt:?}"
                )));
            }
        }
        Ok(())
    }

    pub fn workbook_path(&self) -> Result<PathBuf> {
        self.spreadsheet
            .filename
            .as_deref()
            .map(|f| PathBuf::from(shellexpand_path(f)))
            .ok_or_else(|| {
                YearendError::Settings(
                    "no input workbook: set spreadsheet.filename or pass --workbook".to_string(),
                )
            })
    }
}

pub fn load_settings(path: &Path) -> Result<Settings> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        YearendError::Settings(format!("cannot read {}: {e}", path.display()))
    })?;
    let settings: Settings = serde_json::from_str(&content)?;
    settings.validate()?;
    Ok(settings)
}

pub fn save_settings(settings: &Settings, path: &Path) -> Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)?;
    }
    let json = serde_json::to_string_pretty(settings)?;
    std::fs::write(path, format!("{json}\n"))?;
    Ok(())
}

pub fn shellexpand_path(path: &str) -> String {
    if path.starts_with('~') {
        if let Some(home) = dirs::home_dir() {
            return path.replacen('~', &home.to_string_lossy(), 1);
        }
    }
    path.to_string()
}
