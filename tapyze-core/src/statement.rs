//! Statement view: filtered month groups plus totals, built together.
//!
//! Groups and totals always come from one filtered sequence, so the list and
//! the summary can never disagree for a given filter.

use serde::Serialize;

use crate::error::{FilterError, TotalsOverflow};
use crate::filter::StatementFilter;
use crate::grouping::{MonthGroup, group_by_month};
use crate::totals::{PeriodTotals, aggregate};
use crate::transaction::DisplayTransaction;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct StatementView {
    pub filter: StatementFilter,
    pub groups: Vec<MonthGroup>,
    pub totals: PeriodTotals,
}

impl StatementView {
    pub fn build(
        items: &[DisplayTransaction],
        filter: &StatementFilter,
    ) -> Result<Self, TotalsOverflow> {
        let selected: Vec<DisplayTransaction> = filter.apply(items).cloned().collect();
        let totals = aggregate(&selected)?;
        Ok(Self {
            filter: *filter,
            groups: group_by_month(selected),
            totals,
        })
    }

    pub fn transaction_count(&self) -> usize {
        self.groups.iter().map(MonthGroup::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Transactions in display order: newest month first, input order inside
    pub fn transactions(&self) -> impl Iterator<Item = (&MonthGroup, &DisplayTransaction)> {
        self.groups
            .iter()
            .flat_map(|g| g.transactions.iter().map(move |t| (g, t)))
    }

    pub fn total_pages(&self, per_page: usize) -> Result<usize, FilterError> {
        total_pages(self.transaction_count(), per_page)
    }

    /// One page (1-based) of the view, regrouped by month. Pages past the end
    /// are empty.
    pub fn page(&self, page: usize, per_page: usize) -> Result<Vec<MonthGroup>, FilterError> {
        if per_page == 0 {
            return Err(FilterError::ZeroPerPage);
        }
        if page == 0 {
            return Err(FilterError::ZeroPage);
        }

        let skip = (page - 1).saturating_mul(per_page);
        let mut out: Vec<MonthGroup> = Vec::new();
        for (group, txn) in self.transactions().skip(skip).take(per_page) {
            match out.last_mut() {
                Some(last) if last.key == group.key => last.transactions.push(txn.clone()),
                _ => out.push(MonthGroup {
                    key: group.key.clone(),
                    label: group.label.clone(),
                    transactions: vec![txn.clone()],
                }),
            }
        }
        Ok(out)
    }
}

/// Number of pages needed for `items` at `per_page` each
pub fn total_pages(items: usize, per_page: usize) -> Result<usize, FilterError> {
    if per_page == 0 {
        return Err(FilterError::ZeroPerPage);
    }
    Ok(items.div_ceil(per_page))
}
