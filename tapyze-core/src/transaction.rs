//! Transaction record types: the raw backend shape and the display shape.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Status reported when the backend omits one.
pub const DEFAULT_STATUS: &str = "COMPLETED";

/// A transaction exactly as the wallet backend returns it.
///
/// `kind` and `created_at` are kept as strings, empty when absent, so that a
/// bad or missing value is reported against the record's id instead of
/// failing the whole page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RawTransaction {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    /// `CREDIT` or `DEBIT`
    #[serde(rename = "type", default)]
    pub kind: String,
    /// Magnitude; the sign comes from `kind` only.
    pub amount: Decimal,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub reference: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub metadata: Option<Value>,
}

impl RawTransaction {
    pub fn new(
        id: impl Into<String>,
        kind: impl Into<String>,
        amount: Decimal,
        description: impl Into<String>,
        created_at: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            amount,
            description: description.into(),
            created_at: created_at.into(),
            reference: None,
            status: None,
            metadata: None,
        }
    }

    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn with_metadata(mut self, metadata: Value) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

/// Sign-determining tag of a raw transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TxnKind {
    Credit,
    Debit,
}

impl TxnKind {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "CREDIT" => Some(Self::Credit),
            "DEBIT" => Some(Self::Debit),
            _ => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Credit => "CREDIT",
            Self::Debit => "DEBIT",
        }
    }
}

/// How a transaction is presented in lists and tabs
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum DisplayType {
    Deposit,
    Withdraw,
    Payment,
}

impl DisplayType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Deposit => "deposit",
            Self::Withdraw => "withdraw",
            Self::Payment => "payment",
        }
    }
}

/// Semantic category inferred from the description
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Category {
    Transfer,
    Deposit,
    Withdrawal,
    General,
}

impl Category {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Transfer => "Transfer",
            Self::Deposit => "Deposit",
            Self::Withdrawal => "Withdrawal",
            Self::General => "General",
        }
    }
}

/// A normalized, display-ready transaction
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DisplayTransaction {
    pub id: String,
    pub display_type: DisplayType,
    /// The backend description, unchanged
    pub title: String,
    /// Positive for credits, negative for debits
    pub signed_amount: Decimal,
    /// Calendar date of `createdAt` in the normalizer's zone
    pub iso_date: NaiveDate,
    pub category: Category,
    pub loyalty_points: u64,
    pub reference: Option<String>,
    pub status: String,
    pub metadata: Option<Value>,
}

impl DisplayTransaction {
    pub fn is_income(&self) -> bool {
        self.signed_amount > Decimal::ZERO
    }

    pub fn is_expense(&self) -> bool {
        self.signed_amount < Decimal::ZERO
    }

    pub fn abs_amount(&self) -> Decimal {
        self.signed_amount.abs()
    }
}
