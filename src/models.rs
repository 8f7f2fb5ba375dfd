use chrono::NaiveDate;

pub const CREDIT_LABEL: &str = "BANK - PAID IN";
pub const DEBIT_LABEL: &str = "BANK - PAID OUT";

/// One line of the transaction log after parsing.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub date: NaiveDate,
    pub payee: String,
    pub amount: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Block {
    Credit,
    Debit,
}

impl Block {
    /// Anything above -1 is treated as money in, so small negative
    /// adjustments in (-1, 0) land in the credit block.
    pub fn for_amount(amount: f64) -> Self {
        if amount > -1.0 {
            Self::Credit
        } else {
            Self::Debit
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Credit => CREDIT_LABEL,
            Self::Debit => DEBIT_LABEL,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Credit => "credit",
            Self::Debit => "debit",
        }
    }
}
