use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

/// A backend record that cannot be normalized without guessing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedRecord {
    #[error("transaction `{id}` has unparseable createdAt `{value}`")]
    CreatedAt { id: String, value: String },

    #[error("transaction `{id}` has unknown type `{value}` (expected CREDIT or DEBIT)")]
    Kind { id: String, value: String },

    #[error("transaction `{id}` amount {amount} is out of range")]
    Amount { id: String, amount: Decimal },
}

impl MalformedRecord {
    /// Id of the offending record
    pub fn record_id(&self) -> &str {
        match self {
            Self::CreatedAt { id, .. } | Self::Kind { id, .. } | Self::Amount { id, .. } => id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    #[error("invalid date range: {start} is after {end}")]
    InvertedRange { start: NaiveDate, end: NaiveDate },

    #[error("unknown tab `{0}` (expected all, payment, deposit or withdraw)")]
    UnknownTab(String),

    #[error("unknown range preset `{0}` (expected last-30-days, last-3-months or this-year)")]
    UnknownPreset(String),

    #[error("items per page must be at least 1")]
    ZeroPerPage,

    #[error("page numbers start at 1")]
    ZeroPage,
}

/// A period total that no longer fits its type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TotalsOverflow {
    #[error("income total overflows")]
    Income,

    #[error("expense total overflows")]
    Expenses,

    #[error("loyalty point total overflows")]
    Points,
}
