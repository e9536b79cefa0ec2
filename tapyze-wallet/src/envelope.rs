//! Wire types of the wallet REST API and saved transaction feeds.
//!
//! Every response is wrapped as
//! `{ "status": "success", "message": "...", "data": { ... } }`.

use std::path::Path;

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tapyze_core::RawTransaction;

use crate::error::{WalletError, WalletResult};

pub const SUCCESS_STATUS: &str = "success";
const FALLBACK_MESSAGE: &str = "Something went wrong";

/// Response wrapper with the payload left undecoded
#[derive(Debug, Clone, Deserialize)]
pub struct ApiEnvelope {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<Value>,
}

impl ApiEnvelope {
    pub fn is_success(&self) -> bool {
        self.status.as_deref() == Some(SUCCESS_STATUS)
    }

    pub fn message_or_default(&self) -> String {
        self.message
            .clone()
            .unwrap_or_else(|| FALLBACK_MESSAGE.to_string())
    }

    /// Decode `data`, treating a non-success status as an API error.
    pub fn into_data<T: serde::de::DeserializeOwned>(self, http_status: u16) -> WalletResult<T> {
        if !self.is_success() {
            return Err(WalletError::Api {
                status: http_status,
                message: self.message_or_default(),
            });
        }
        let data = self
            .data
            .ok_or_else(|| WalletError::Decode("response has no data".to_string()))?;
        Ok(serde_json::from_value(data)?)
    }
}

/// Page metadata as reported by the backend; every field is optional
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    #[serde(default)]
    pub current_page: Option<u32>,
    #[serde(default)]
    pub total_pages: Option<u32>,
    #[serde(default)]
    pub total_transactions: Option<u64>,
    #[serde(default)]
    pub limit: Option<u32>,
}

/// One page of the transaction history
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TransactionPage {
    #[serde(default)]
    pub transactions: Vec<RawTransaction>,
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

impl TransactionPage {
    /// True when the backend says more pages follow this one
    pub fn has_more(&self) -> bool {
        match &self.pagination {
            Some(Pagination {
                current_page: Some(current),
                total_pages: Some(total),
                ..
            }) => current < total,
            _ => false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WalletBalance {
    pub balance: Decimal,
    #[serde(default)]
    pub currency: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TopUpReceipt {
    pub balance: Decimal,
    #[serde(default)]
    pub transaction: Option<RawTransaction>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TransferReceipt {
    pub sender_balance: Decimal,
    #[serde(default)]
    pub transaction: Option<RawTransaction>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RecipientType {
    #[serde(rename = "USER")]
    User,
    #[serde(rename = "BUSINESS")]
    Business,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TransferRequest {
    pub recipient_id: String,
    pub recipient_type: RecipientType,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub description: String,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct TopUpRequest {
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
}

enum FeedShape {
    Envelope,
    Page,
    Bare,
}

fn feed_shape(value: &Value) -> Option<FeedShape> {
    match value {
        Value::Array(_) => Some(FeedShape::Bare),
        Value::Object(map) if map.contains_key("status") || map.contains_key("data") => {
            Some(FeedShape::Envelope)
        }
        Value::Object(map) if map.contains_key("transactions") => Some(FeedShape::Page),
        _ => None,
    }
}

/// Parse a saved transaction feed: a full API response, its `data` object,
/// or a bare JSON array of transactions.
///
/// A failed response or a record that does not decode is an error, never an
/// empty feed.
pub fn parse_transaction_feed(text: &str) -> WalletResult<TransactionPage> {
    let value: Value = serde_json::from_str(text)?;
    match feed_shape(&value) {
        Some(FeedShape::Envelope) => {
            let envelope: ApiEnvelope = serde_json::from_value(value)?;
            if !envelope.is_success() {
                return Err(WalletError::Decode(format!(
                    "saved feed is a failed response: {}",
                    envelope.message_or_default()
                )));
            }
            envelope.into_data(200)
        }
        Some(FeedShape::Page) => Ok(serde_json::from_value(value)?),
        Some(FeedShape::Bare) => Ok(TransactionPage {
            transactions: serde_json::from_value(value)?,
            pagination: None,
        }),
        None => Err(WalletError::Decode(
            "feed is not a response, a transactions object or an array".to_string(),
        )),
    }
}

pub fn read_transaction_feed(path: impl AsRef<Path>) -> Result<TransactionPage> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    parse_transaction_feed(&text).with_context(|| format!("parse feed {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    const ENVELOPE: &str = r#"{
        "status": "success",
        "data": {
            "transactions": [
                {"_id": "a", "type": "CREDIT", "amount": 1250, "description": "Salary top-up", "createdAt": "2025-04-15T10:00:00.000Z"},
                {"_id": "b", "type": "DEBIT", "amount": 65.43, "description": "Grocery Store", "createdAt": "2025-04-14T14:15:00.000Z", "status": "COMPLETED"}
            ],
            "pagination": {"currentPage": 1, "totalPages": 3, "totalTransactions": 25, "limit": 10}
        }
    }"#;

    #[test]
    fn test_parse_full_envelope() {
        let page = parse_transaction_feed(ENVELOPE).unwrap();
        assert_eq!(page.transactions.len(), 2);
        assert_eq!(page.transactions[1].amount, Decimal::from_str("65.43").unwrap());
        assert!(page.has_more());
    }

    #[test]
    fn test_parse_bare_array() {
        let text = r#"[{"_id": "x", "type": "DEBIT", "amount": 5, "createdAt": "2025-01-01"}]"#;
        let page = parse_transaction_feed(text).unwrap();
        assert_eq!(page.transactions.len(), 1);
        assert!(page.pagination.is_none());
        assert!(!page.has_more());
    }

    #[test]
    fn test_parse_data_object() {
        let text = r#"{"transactions": [], "pagination": {"currentPage": 2, "totalPages": 2}}"#;
        let page = parse_transaction_feed(text).unwrap();
        assert!(page.transactions.is_empty());
        assert!(!page.has_more());
    }

    #[test]
    fn test_parse_garbage_fails() {
        assert!(matches!(
            parse_transaction_feed("not json"),
            Err(WalletError::Decode(_))
        ));
    }

    #[test]
    fn test_undecodable_record_fails_whole_feed() {
        let text = r#"{"status": "success", "data": {"transactions": [
            {"_id": "a", "type": "CREDIT", "amount": 10, "createdAt": "2025-04-01"},
            {"_id": "b", "type": "DEBIT", "amount": "lots", "createdAt": "2025-04-02"}
        ]}}"#;
        assert!(matches!(
            parse_transaction_feed(text),
            Err(WalletError::Decode(_))
        ));
    }

    #[test]
    fn test_record_without_date_is_kept_for_normalize() {
        let text = r#"{"status": "success", "data": {"transactions": [
            {"_id": "a", "type": "CREDIT", "amount": 10, "createdAt": "2025-04-01"},
            {"_id": "b", "type": "DEBIT", "amount": 3}
        ]}}"#;
        let page = parse_transaction_feed(text).unwrap();
        assert_eq!(page.transactions.len(), 2);
        assert_eq!(page.transactions[1].created_at, "");
    }

    #[test]
    fn test_failed_response_is_not_an_empty_feed() {
        let err = parse_transaction_feed(r#"{"status": "fail", "message": "Invalid token"}"#)
            .unwrap_err();
        match err {
            WalletError::Decode(msg) => assert!(msg.contains("Invalid token")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_unrecognised_object_fails() {
        assert!(matches!(
            parse_transaction_feed(r#"{"items": []}"#),
            Err(WalletError::Decode(_))
        ));
        assert!(matches!(
            parse_transaction_feed("42"),
            Err(WalletError::Decode(_))
        ));
    }

    #[test]
    fn test_failed_envelope_is_api_error() {
        let env: ApiEnvelope =
            serde_json::from_str(r#"{"status": "fail", "message": "Invalid token"}"#).unwrap();
        let err = env.into_data::<WalletBalance>(401).unwrap_err();
        match err {
            WalletError::Api { status, message } => {
                assert_eq!(status, 401);
                assert_eq!(message, "Invalid token");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_transfer_request_wire_shape() {
        let req = TransferRequest {
            recipient_id: "u-42".to_string(),
            recipient_type: RecipientType::Business,
            amount: Decimal::new(2550, 2),
            description: "Lunch".to_string(),
        };
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["recipientId"], "u-42");
        assert_eq!(value["recipientType"], "BUSINESS");
        assert_eq!(value["amount"], 25.5);
    }
}
