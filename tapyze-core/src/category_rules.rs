//! Deterministic rules mapping a transaction description to its category
//! and display type.
//!
//! Rules are checked in order and the first match wins, so a description
//! mentioning both "transfer" and "withdraw" is a Transfer.

use crate::transaction::{Category, DisplayType, TxnKind};

/// One category rule: any of `tokens` found in the lower-cased description
#[derive(Debug, Clone, Copy)]
pub struct CategoryRule {
    pub category: Category,
    pub tokens: &'static [&'static str],
}

pub const CATEGORY_RULES: &[CategoryRule] = &[
    CategoryRule {
        category: Category::Transfer,
        tokens: &["transfer"],
    },
    CategoryRule {
        category: Category::Deposit,
        tokens: &["top-up", "topup"],
    },
    CategoryRule {
        category: Category::Withdrawal,
        tokens: &["withdraw"],
    },
];

const TRANSFER_TOKEN: &str = "transfer";

/// Category for a description. Falls back to General.
pub fn categorize(description: &str) -> Category {
    let desc = description.to_lowercase();
    CATEGORY_RULES
        .iter()
        .find(|rule| rule.tokens.iter().any(|t| desc.contains(t)))
        .map(|rule| rule.category)
        .unwrap_or(Category::General)
}

/// Display type for a transaction.
///
/// Credits are always deposits, incoming transfers included. Debits are
/// payments when they are transfers and withdrawals otherwise.
pub fn display_type_for(kind: TxnKind, description: &str) -> DisplayType {
    match kind {
        TxnKind::Credit => DisplayType::Deposit,
        TxnKind::Debit if description.to_lowercase().contains(TRANSFER_TOKEN) => {
            DisplayType::Payment
        }
        TxnKind::Debit => DisplayType::Withdraw,
    }
}
