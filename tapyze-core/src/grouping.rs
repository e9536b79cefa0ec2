//! Group display transactions into calendar-month statements.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::TotalsOverflow;
use crate::time::{month_key, month_label};
use crate::totals::{PeriodTotals, aggregate};
use crate::transaction::DisplayTransaction;

/// One calendar month of transactions
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MonthGroup {
    /// `YYYY-MM`
    pub key: String,
    /// e.g. "April 2025"
    pub label: String,
    /// In the order they were received
    pub transactions: Vec<DisplayTransaction>,
}

impl MonthGroup {
    pub fn totals(&self) -> Result<PeriodTotals, TotalsOverflow> {
        aggregate(&self.transactions)
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}

/// Bucket transactions by month, newest month first.
///
/// Order inside a month is the input order. The label is fixed by the first
/// transaction seen for a month.
pub fn group_by_month(items: impl IntoIterator<Item = DisplayTransaction>) -> Vec<MonthGroup> {
    let mut groups: BTreeMap<String, MonthGroup> = BTreeMap::new();

    for txn in items {
        let key = month_key(txn.iso_date);
        groups
            .entry(key)
            .or_insert_with_key(|key| MonthGroup {
                key: key.clone(),
                label: month_label(txn.iso_date),
                transactions: Vec::new(),
            })
            .transactions
            .push(txn);
    }

    groups.into_values().rev().collect()
}
