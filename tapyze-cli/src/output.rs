//! Plain-text rendering of statements and transaction lists.

use rust_decimal::{Decimal, RoundingStrategy};
use tapyze_core::{DisplayTransaction, MonthGroup, PeriodTotals, StatementFilter};

/// `1234.5` -> `Rs. 1,234.50`; negatives keep their sign in front.
pub fn format_money(amount: Decimal, symbol: &str) -> String {
    let rounded = amount
        .abs()
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let text = format!("{rounded:.2}");
    let (whole, frac) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::new();
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if amount < Decimal::ZERO && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{sign}{symbol} {grouped}.{frac}")
}

fn describe_filter(filter: &StatementFilter) -> String {
    let range = match filter.range {
        Some(r) => format!("{} to {}", r.start_date(), r.end_date()),
        None => "all dates".to_string(),
    };
    format!("{range}, tab: {}", filter.tab)
}

pub fn render_transaction(txn: &DisplayTransaction, symbol: &str) -> String {
    let mut line = format!(
        "  {}  {:>16}  {}  [{} | {}]",
        txn.iso_date,
        format_money(txn.signed_amount, symbol),
        txn.title,
        txn.category.as_str(),
        txn.display_type.as_str(),
    );
    if txn.loyalty_points > 0 {
        line.push_str(&format!("  +{} pts", txn.loyalty_points));
    }
    if txn.status != tapyze_core::DEFAULT_STATUS {
        line.push_str(&format!("  ({})", txn.status));
    }
    line
}

pub fn render_totals(totals: &PeriodTotals, symbol: &str) -> String {
    format!(
        "Income: {}   Expenses: {}   Points: {}",
        format_money(totals.income, symbol),
        format_money(totals.expenses, symbol),
        totals.points
    )
}

pub fn render_statement(
    filter: &StatementFilter,
    groups: &[MonthGroup],
    totals: &PeriodTotals,
    symbol: &str,
) -> String {
    let mut out = String::new();
    out.push_str(&format!("# Statement ({})\n\n", describe_filter(filter)));
    out.push_str(&render_totals(totals, symbol));
    out.push('\n');

    if groups.is_empty() {
        out.push_str("\nNo transactions found for the selected period.\n");
        return out;
    }

    for group in groups {
        out.push_str(&format!("\n## {} ({} transactions)\n", group.label, group.len()));
        for txn in &group.transactions {
            out.push_str(&render_transaction(txn, symbol));
            out.push('\n');
        }
    }
    out
}
