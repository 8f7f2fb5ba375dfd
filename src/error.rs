use thiserror::Error;

#[derive(Error, Debug)]
pub enum YearendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Config error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("required header column {0} does not exist")]
    MissingColumn(&'static str),

    #[error("Unable to parse meta")]
    EmptyTransactions,

    #[error("line {line}: {message}")]
    Parse { line: u64, message: String },

    #[error("Workbook error: {0}")]
    Workbook(String),

    #[error("Worksheet '{0}' not found in workbook")]
    SheetNotFound(String),

    #[error("Label '{label}' not found in the first columns of worksheet '{sheet}'")]
    LabelNotFound { sheet: String, label: String },

    #[error("No free row below {0}")]
    BlockFull(String),

    #[error("Invalid cell address: {0}")]
    InvalidAddress(String),
}

pub type Result<T> = std::result::Result<T, YearendError>;
