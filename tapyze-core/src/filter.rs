//! Statement filters: inclusive date ranges and dashboard tabs.
//!
//! The same filter value feeds both the grouped list and the totals, see
//! [`crate::statement::StatementView`].

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::FilterError;
use crate::transaction::{DisplayTransaction, DisplayType};

/// Inclusive calendar-date range
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    start_date: NaiveDate,
    end_date: NaiveDate,
}

impl DateRange {
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Result<Self, FilterError> {
        if start_date > end_date {
            return Err(FilterError::InvertedRange {
                start: start_date,
                end: end_date,
            });
        }
        Ok(Self {
            start_date,
            end_date,
        })
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }
}

/// Quick ranges offered next to the date pickers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangePreset {
    Last30Days,
    Last3Months,
    ThisYear,
}

impl RangePreset {
    /// Range ending on `today`. Month steps clamp to the end of shorter months.
    pub fn range_ending(self, today: NaiveDate) -> DateRange {
        let start = match self {
            Self::Last30Days => today.checked_sub_months(Months::new(1)),
            Self::Last3Months => today.checked_sub_months(Months::new(3)),
            Self::ThisYear => NaiveDate::from_ymd_opt(today.year(), 1, 1),
        }
        .unwrap_or(today);
        DateRange {
            start_date: start,
            end_date: today,
        }
    }
}

impl FromStr for RangePreset {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "last-30-days" => Ok(Self::Last30Days),
            "last-3-months" => Ok(Self::Last3Months),
            "this-year" => Ok(Self::ThisYear),
            other => Err(FilterError::UnknownPreset(other.to_string())),
        }
    }
}

/// Dashboard tab selector
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    #[default]
    All,
    Payment,
    Deposit,
    Withdraw,
}

impl Tab {
    pub fn matches(self, display_type: DisplayType) -> bool {
        match self {
            Self::All => true,
            Self::Payment => display_type == DisplayType::Payment,
            Self::Deposit => display_type == DisplayType::Deposit,
            Self::Withdraw => display_type == DisplayType::Withdraw,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Payment => "payment",
            Self::Deposit => "deposit",
            Self::Withdraw => "withdraw",
        }
    }
}

impl FromStr for Tab {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(Self::All),
            "payment" | "payments" => Ok(Self::Payment),
            "deposit" | "deposits" => Ok(Self::Deposit),
            "withdraw" | "withdrawals" => Ok(Self::Withdraw),
            other => Err(FilterError::UnknownTab(other.to_string())),
        }
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Date range plus tab; `None` range means every date
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct StatementFilter {
    pub range: Option<DateRange>,
    pub tab: Tab,
}

impl StatementFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn with_range(mut self, range: DateRange) -> Self {
        self.range = Some(range);
        self
    }

    pub fn with_tab(mut self, tab: Tab) -> Self {
        self.tab = tab;
        self
    }

    pub fn matches(&self, txn: &DisplayTransaction) -> bool {
        self.range.is_none_or(|r| r.contains(txn.iso_date)) && self.tab.matches(txn.display_type)
    }

    pub fn apply<'a>(
        &'a self,
        items: impl IntoIterator<Item = &'a DisplayTransaction>,
    ) -> impl Iterator<Item = &'a DisplayTransaction> {
        items.into_iter().filter(move |txn| self.matches(txn))
    }
}
