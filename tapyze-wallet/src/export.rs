//! CSV export of a statement view.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use serde::Serialize;
use tapyze_core::StatementView;

const COLUMNS: [&str; 10] = [
    "month", "date", "id", "type", "category", "title", "amount", "points", "status", "reference",
];

#[derive(Debug, Serialize)]
struct StatementRow<'a> {
    month: &'a str,
    date: String,
    id: &'a str,
    #[serde(rename = "type")]
    display_type: &'static str,
    category: &'static str,
    title: &'a str,
    amount: Decimal,
    points: u64,
    status: &'a str,
    reference: &'a str,
}

/// Write a header row, then one row per transaction in view order.
pub fn write_statement_csv<W: Write>(view: &StatementView, writer: W) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    wtr.write_record(COLUMNS).context("write statement header")?;
    for (group, txn) in view.transactions() {
        wtr.serialize(StatementRow {
            month: &group.label,
            date: txn.iso_date.format("%Y-%m-%d").to_string(),
            id: &txn.id,
            display_type: txn.display_type.as_str(),
            category: txn.category.as_str(),
            title: &txn.title,
            amount: txn.signed_amount,
            points: txn.loyalty_points,
            status: &txn.status,
            reference: txn.reference.as_deref().unwrap_or(""),
        })
        .context("write statement row")?;
    }
    wtr.flush().context("flush statement csv")?;
    Ok(())
}

pub fn export_statement_csv(view: &StatementView, path: impl AsRef<Path>) -> Result<usize> {
    let path = path.as_ref();
    let file = std::fs::File::create(path).with_context(|| format!("create {}", path.display()))?;
    write_statement_csv(view, file)?;
    Ok(view.transaction_count())
}
