use rust_decimal::Decimal;
use tapyze_core::MalformedRecord;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WalletError {
    #[error("wallet request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("wallet API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("could not decode wallet response: {0}")]
    Decode(String),

    #[error("no bearer token available")]
    MissingToken,

    #[error("amount must be greater than zero, got {0}")]
    InvalidAmount(Decimal),

    #[error(transparent)]
    Malformed(#[from] MalformedRecord),
}

impl From<serde_json::Error> for WalletError {
    fn from(err: serde_json::Error) -> Self {
        WalletError::Decode(err.to_string())
    }
}

pub type WalletResult<T> = Result<T, WalletError>;
