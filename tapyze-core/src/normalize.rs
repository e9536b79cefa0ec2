//! Normalize raw backend transactions into display records.

use chrono_tz::Tz;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::category_rules::{categorize, display_type_for};
use crate::error::MalformedRecord;
use crate::time::{DEFAULT_ZONE, calendar_date};
use crate::transaction::{DEFAULT_STATUS, DisplayTransaction, RawTransaction, TxnKind};

/// Normalize with dates taken in UTC.
pub fn normalize(raw: &RawTransaction) -> Result<DisplayTransaction, MalformedRecord> {
    normalize_in(raw, DEFAULT_ZONE)
}

/// Normalize with dates taken in `zone`.
pub fn normalize_in(raw: &RawTransaction, zone: Tz) -> Result<DisplayTransaction, MalformedRecord> {
    let kind = TxnKind::parse(&raw.kind).ok_or_else(|| MalformedRecord::Kind {
        id: raw.id.clone(),
        value: raw.kind.clone(),
    })?;

    let iso_date = calendar_date(&raw.created_at, zone).ok_or_else(|| MalformedRecord::CreatedAt {
        id: raw.id.clone(),
        value: raw.created_at.clone(),
    })?;

    // abs() first so an already-signed upstream amount cannot flip twice
    let magnitude = raw.amount.abs();
    let signed_amount = match kind {
        TxnKind::Credit => magnitude,
        TxnKind::Debit => -magnitude,
    };

    let loyalty_points = match kind {
        TxnKind::Credit => 0,
        TxnKind::Debit => loyalty_points_for(magnitude).ok_or_else(|| MalformedRecord::Amount {
            id: raw.id.clone(),
            amount: raw.amount,
        })?,
    };

    Ok(DisplayTransaction {
        id: raw.id.clone(),
        display_type: display_type_for(kind, &raw.description),
        title: raw.description.clone(),
        signed_amount,
        iso_date,
        category: categorize(&raw.description),
        loyalty_points,
        reference: raw.reference.clone(),
        status: raw
            .status
            .clone()
            .unwrap_or_else(|| DEFAULT_STATUS.to_string()),
        metadata: raw.metadata.clone(),
    })
}

/// Normalize a whole feed, stopping at the first malformed record.
pub fn normalize_all<'a>(
    raws: impl IntoIterator<Item = &'a RawTransaction>,
    zone: Tz,
) -> Result<Vec<DisplayTransaction>, MalformedRecord> {
    raws.into_iter().map(|raw| normalize_in(raw, zone)).collect()
}

/// One point per whole currency unit spent
fn loyalty_points_for(magnitude: Decimal) -> Option<u64> {
    magnitude.trunc().to_u64()
}
