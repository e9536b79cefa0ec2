//! Income, expense and loyalty-point totals over a set of transactions.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::TotalsOverflow;
use crate::transaction::DisplayTransaction;

/// Summary totals for a period
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PeriodTotals {
    /// Sum of positive amounts
    pub income: Decimal,
    /// Sum of the magnitudes of negative amounts
    pub expenses: Decimal,
    pub points: u64,
}

impl PeriodTotals {
    pub fn net(&self) -> Decimal {
        self.income - self.expenses
    }

    /// Field-wise sum, failing instead of wrapping.
    pub fn checked_add(self, rhs: PeriodTotals) -> Result<PeriodTotals, TotalsOverflow> {
        Ok(PeriodTotals {
            income: self
                .income
                .checked_add(rhs.income)
                .ok_or(TotalsOverflow::Income)?,
            expenses: self
                .expenses
                .checked_add(rhs.expenses)
                .ok_or(TotalsOverflow::Expenses)?,
            points: self
                .points
                .checked_add(rhs.points)
                .ok_or(TotalsOverflow::Points)?,
        })
    }

    fn of(txn: &DisplayTransaction) -> PeriodTotals {
        let amount = txn.signed_amount;
        PeriodTotals {
            income: amount.max(Decimal::ZERO),
            expenses: (-amount).max(Decimal::ZERO),
            points: txn.loyalty_points,
        }
    }
}

/// Totals over `items` in a single pass. Order does not matter.
pub fn aggregate<'a>(
    items: impl IntoIterator<Item = &'a DisplayTransaction>,
) -> Result<PeriodTotals, TotalsOverflow> {
    items
        .into_iter()
        .try_fold(PeriodTotals::default(), |acc, txn| {
            acc.checked_add(PeriodTotals::of(txn))
        })
}

/// Combine already computed totals, e.g. per-month subtotals.
pub fn sum_totals(
    parts: impl IntoIterator<Item = PeriodTotals>,
) -> Result<PeriodTotals, TotalsOverflow> {
    parts
        .into_iter()
        .try_fold(PeriodTotals::default(), PeriodTotals::checked_add)
}
