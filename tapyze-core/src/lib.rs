//! tapyze-core: wallet transaction view-model layer.
//!
//! Turns raw backend transaction records into display-ready records, groups
//! them into monthly statements and computes period totals. Everything in
//! this crate is pure and synchronous.

pub mod category_rules;
pub mod error;
pub mod filter;
pub mod grouping;
pub mod normalize;
pub mod statement;
pub mod time;
pub mod totals;
pub mod transaction;

pub use category_rules::{categorize, display_type_for};
pub use error::{FilterError, MalformedRecord, TotalsOverflow};
pub use filter::{DateRange, RangePreset, StatementFilter, Tab};
pub use grouping::{MonthGroup, group_by_month};
pub use normalize::{normalize, normalize_all, normalize_in};
pub use statement::{StatementView, total_pages};
pub use totals::{PeriodTotals, aggregate, sum_totals};
pub use transaction::{
    Category, DEFAULT_STATUS, DisplayTransaction, DisplayType, RawTransaction, TxnKind,
};
