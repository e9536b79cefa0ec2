//! Statements model: last-known-good normalized transactions plus refresh
//! bookkeeping.
//!
//! A failed fetch never clears what is already shown. Each refresh takes a
//! [`Generation`] ticket; a result older than one already applied is dropped.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use tapyze_core::{
    DisplayTransaction, MalformedRecord, RawTransaction, StatementFilter, StatementView,
    TotalsOverflow, normalize_all,
};
use tracing::{debug, info, warn};

use crate::client::WalletClient;
use crate::error::WalletError;

/// Refresh ticket, increasing per [`StatementsModel::begin_refresh`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Generation(u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// New data replaced the previous state
    Updated { count: usize },
    /// The fetch failed; previous state kept
    Retained { error: String },
    /// A newer refresh already landed; result dropped
    Superseded,
}

#[derive(Debug, Clone)]
pub struct StatementsModel {
    zone: Tz,
    issued: u64,
    applied: u64,
    transactions: Vec<DisplayTransaction>,
    refreshed_at: Option<DateTime<Utc>>,
    last_error: Option<String>,
}

impl StatementsModel {
    pub fn new(zone: Tz) -> Self {
        Self {
            zone,
            issued: 0,
            applied: 0,
            transactions: Vec::new(),
            refreshed_at: None,
            last_error: None,
        }
    }

    pub fn zone(&self) -> Tz {
        self.zone
    }

    pub fn begin_refresh(&mut self) -> Generation {
        self.issued += 1;
        Generation(self.issued)
    }

    /// Apply the result of the fetch started with `generation`.
    ///
    /// A malformed record is an error and leaves the previous state in place.
    pub fn apply(
        &mut self,
        generation: Generation,
        fetched: Result<Vec<RawTransaction>, WalletError>,
    ) -> Result<RefreshOutcome, MalformedRecord> {
        if generation.0 <= self.applied {
            debug!(generation = generation.0, applied = self.applied, "dropping superseded refresh");
            return Ok(RefreshOutcome::Superseded);
        }

        let raws = match fetched {
            Ok(raws) => raws,
            Err(err) => {
                warn!(error = %err, "refresh failed; keeping last statement data");
                let error = err.to_string();
                self.last_error = Some(error.clone());
                return Ok(RefreshOutcome::Retained { error });
            }
        };

        let normalized = normalize_all(&raws, self.zone).inspect_err(|err| {
            warn!(record = err.record_id(), error = %err, "malformed transaction in feed");
        })?;

        let count = normalized.len();
        self.transactions = normalized;
        self.applied = generation.0;
        self.refreshed_at = Some(Utc::now());
        self.last_error = None;
        info!(count, "statement data refreshed");
        Ok(RefreshOutcome::Updated { count })
    }

    /// Fetch the statements feed and apply it.
    pub async fn refresh(
        &mut self,
        client: &WalletClient,
        limit: u32,
    ) -> Result<RefreshOutcome, MalformedRecord> {
        let generation = self.begin_refresh();
        let fetched = client
            .statement_feed(limit)
            .await
            .map(|page| page.transactions);
        self.apply(generation, fetched)
    }

    pub fn transactions(&self) -> &[DisplayTransaction] {
        &self.transactions
    }

    pub fn refreshed_at(&self) -> Option<DateTime<Utc>> {
        self.refreshed_at
    }

    /// Error of the most recent failed refresh, cleared by a successful one
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn view(&self, filter: &StatementFilter) -> Result<StatementView, TotalsOverflow> {
        StatementView::build(&self.transactions, filter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use tapyze_core::time::DEFAULT_ZONE;

    fn raw(id: &str, created_at: &str) -> RawTransaction {
        RawTransaction::new(id, "DEBIT", Decimal::new(1000, 2), "Coffee", created_at)
    }

    #[test]
    fn test_update_then_retain_on_failure() {
        let mut model = StatementsModel::new(DEFAULT_ZONE);
        let g1 = model.begin_refresh();
        let out = model.apply(g1, Ok(vec![raw("a", "2025-04-01")])).unwrap();
        assert_eq!(out, RefreshOutcome::Updated { count: 1 });

        let g2 = model.begin_refresh();
        let out = model
            .apply(g2, Err(WalletError::Decode("timeout".to_string())))
            .unwrap();
        assert!(matches!(out, RefreshOutcome::Retained { .. }));
        assert_eq!(model.transactions().len(), 1);
        assert!(model.last_error().is_some());
    }

    #[test]
    fn test_late_result_is_superseded() {
        let mut model = StatementsModel::new(DEFAULT_ZONE);
        let old = model.begin_refresh();
        let new = model.begin_refresh();

        model
            .apply(new, Ok(vec![raw("new", "2025-04-02")]))
            .unwrap();
        let out = model.apply(old, Ok(vec![raw("old", "2025-03-01")])).unwrap();

        assert_eq!(out, RefreshOutcome::Superseded);
        assert_eq!(model.transactions()[0].id, "new");
    }

    #[test]
    fn test_older_ticket_applies_when_nothing_newer_landed() {
        let mut model = StatementsModel::new(DEFAULT_ZONE);
        let old = model.begin_refresh();
        let _pending = model.begin_refresh();
        let out = model.apply(old, Ok(vec![raw("old", "2025-03-01")])).unwrap();
        assert_eq!(out, RefreshOutcome::Updated { count: 1 });
    }

    #[test]
    fn test_malformed_feed_keeps_previous_state() {
        let mut model = StatementsModel::new(DEFAULT_ZONE);
        let g1 = model.begin_refresh();
        model.apply(g1, Ok(vec![raw("good", "2025-04-01")])).unwrap();

        let g2 = model.begin_refresh();
        let err = model
            .apply(g2, Ok(vec![raw("bad", "April 1st")]))
            .unwrap_err();
        assert_eq!(err.record_id(), "bad");
        assert_eq!(model.transactions()[0].id, "good");
    }

    #[test]
    fn test_record_missing_fields_is_malformed_not_a_fetch_failure() {
        let page = crate::envelope::parse_transaction_feed(
            r#"{"status": "success", "data": {"transactions": [
                {"_id": "ok", "type": "DEBIT", "amount": 10, "createdAt": "2025-04-01"},
                {"_id": "no-date", "type": "DEBIT", "amount": 10}
            ]}}"#,
        )
        .unwrap();

        let mut model = StatementsModel::new(DEFAULT_ZONE);
        let g = model.begin_refresh();
        let err = model.apply(g, Ok(page.transactions)).unwrap_err();
        assert!(matches!(err, MalformedRecord::CreatedAt { ref id, .. } if id == "no-date"));
        assert!(model.last_error().is_none());

        let page = crate::envelope::parse_transaction_feed(
            r#"[{"_id": "no-type", "amount": 10, "createdAt": "2025-04-01"}]"#,
        )
        .unwrap();
        let g = model.begin_refresh();
        let err = model.apply(g, Ok(page.transactions)).unwrap_err();
        assert!(matches!(err, MalformedRecord::Kind { ref id, .. } if id == "no-type"));
    }

    #[test]
    fn test_view_uses_current_state() {
        let mut model = StatementsModel::new(DEFAULT_ZONE);
        assert!(model.view(&StatementFilter::all()).unwrap().is_empty());
        let g = model.begin_refresh();
        model
            .apply(g, Ok(vec![raw("a", "2025-04-01"), raw("b", "2025-03-01")]))
            .unwrap();
        let view = model.view(&StatementFilter::all()).unwrap();
        assert_eq!(view.groups.len(), 2);
        assert_eq!(view.totals.expenses, Decimal::new(20, 0));
    }
}
