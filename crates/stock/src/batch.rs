use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use medstock_core::{BatchId, DomainError, DomainResult, MedicineId};

/// Alert threshold used by the stock summary: a batch with `quantity <= 5`
/// raises a low-stock alert. Deliberately separate from the caller-supplied
/// threshold on the medicine endpoints; callers may override it.
pub const DEFAULT_ALERT_QUANTITY: i32 = 5;

/// One received lot of a medicine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockBatch {
    pub id: BatchId,
    pub medicine_id: MedicineId,
    pub quantity: i32,
    pub batch_number: String,
    pub expiry_date: NaiveDate,
    pub received_date: NaiveDate,
    pub supplier: String,
    pub unit_price: f64,
    pub reorder_level: i32,
}

/// Field set supplied when receiving or overwriting a batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchDraft {
    pub medicine_id: MedicineId,
    pub quantity: i32,
    pub batch_number: String,
    pub expiry_date: NaiveDate,
    pub received_date: NaiveDate,
    pub supplier: String,
    pub unit_price: f64,
    pub reorder_level: i32,
}

impl BatchDraft {
    /// Check the field invariants; called by the service before any write.
    pub fn validate(&self) -> DomainResult<()> {
        if self.quantity < 0 {
            return Err(DomainError::validation(format!(
                "quantity must not be negative, got {}",
                self.quantity
            )));
        }
        if !self.unit_price.is_finite() || self.unit_price < 0.0 {
            return Err(DomainError::validation(format!(
                "unit price must be a non-negative number, got {}",
                self.unit_price
            )));
        }
        if self.reorder_level < 0 {
            return Err(DomainError::validation(format!(
                "reorder level must not be negative, got {}",
                self.reorder_level
            )));
        }
        Ok(())
    }
}

impl StockBatch {
    pub fn from_draft(id: BatchId, draft: BatchDraft) -> Self {
        Self {
            id,
            medicine_id: draft.medicine_id,
            quantity: draft.quantity,
            batch_number: draft.batch_number,
            expiry_date: draft.expiry_date,
            received_date: draft.received_date,
            supplier: draft.supplier,
            unit_price: draft.unit_price,
            reorder_level: draft.reorder_level,
        }
    }

    /// Expires on or before `today + days` (inclusive boundary).
    pub fn expires_within(&self, today: NaiveDate, days: u32) -> bool {
        let horizon = today
            .checked_add_days(Days::new(u64::from(days)))
            .unwrap_or(NaiveDate::MAX);
        self.expiry_date <= horizon
    }
}

/// Aggregate view over all batches on hand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockSummary {
    pub total_items: i64,
    pub total_value: f64,
    pub low_stock_alerts: Vec<StockBatch>,
}

impl StockSummary {
    /// Compute the summary over a set of batches.
    ///
    /// `alert_quantity` is inclusive: a batch with exactly that quantity is
    /// alerted.
    pub fn compute(batches: &[StockBatch], alert_quantity: i32) -> Self {
        let total_items = batches.iter().map(|b| i64::from(b.quantity)).sum();
        let total_value = batches
            .iter()
            .map(|b| f64::from(b.quantity) * b.unit_price)
            .sum();
        let low_stock_alerts = batches
            .iter()
            .filter(|b| b.quantity <= alert_quantity)
            .cloned()
            .collect();

        Self {
            total_items,
            total_value,
            low_stock_alerts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn batch(quantity: i32, unit_price: f64) -> StockBatch {
        StockBatch {
            id: BatchId::new(),
            medicine_id: MedicineId::new(),
            quantity,
            batch_number: "B-001".to_string(),
            expiry_date: date(2027, 1, 1),
            received_date: date(2026, 1, 1),
            supplier: "MedSupply Ltd".to_string(),
            unit_price,
            reorder_level: 10,
        }
    }

    #[test]
    fn summary_totals_and_value() {
        let batches = vec![batch(10, 2.5), batch(4, 1.0)];
        let summary = StockSummary::compute(&batches, DEFAULT_ALERT_QUANTITY);
        assert_eq!(summary.total_items, 14);
        assert!((summary.total_value - 29.0).abs() < f64::EPSILON);
    }

    #[test]
    fn alert_threshold_is_inclusive_at_five() {
        let batches = vec![batch(5, 1.0), batch(6, 1.0)];
        let summary = StockSummary::compute(&batches, DEFAULT_ALERT_QUANTITY);
        assert_eq!(summary.low_stock_alerts.len(), 1);
        assert_eq!(summary.low_stock_alerts[0].quantity, 5);
    }

    fn draft(quantity: i32, unit_price: f64, reorder_level: i32) -> BatchDraft {
        BatchDraft {
            medicine_id: MedicineId::new(),
            quantity,
            batch_number: "B-001".to_string(),
            expiry_date: date(2027, 1, 1),
            received_date: date(2026, 1, 1),
            supplier: "MedSupply Ltd".to_string(),
            unit_price,
            reorder_level,
        }
    }

    #[test]
    fn draft_validation_rejects_negative_fields() {
        assert!(draft(0, 0.0, 0).validate().is_ok());
        assert!(draft(10, 2.5, 5).validate().is_ok());
        assert!(draft(-1, 2.5, 5).validate().is_err());
        assert!(draft(10, -0.01, 5).validate().is_err());
        assert!(draft(10, f64::NAN, 5).validate().is_err());
        assert!(draft(10, 2.5, -1).validate().is_err());
    }

    #[test]
    fn expiring_within_includes_horizon_day() {
        let today = date(2026, 6, 1);
        let mut b = batch(1, 1.0);
        b.expiry_date = date(2026, 7, 1);
        assert!(b.expires_within(today, 30));
        assert!(!b.expires_within(today, 29));
    }

    proptest! {
        #[test]
        fn summary_totals_match_naive_sums(
            quantities in proptest::collection::vec(0i32..10_000, 0..50),
            price_cents in 0u32..100_000,
        ) {
            let unit_price = f64::from(price_cents) / 100.0;
            let batches: Vec<StockBatch> =
                quantities.iter().map(|&q| batch(q, unit_price)).collect();
            let summary = StockSummary::compute(&batches, DEFAULT_ALERT_QUANTITY);

            let expected_items: i64 = quantities.iter().map(|&q| i64::from(q)).sum();
            prop_assert_eq!(summary.total_items, expected_items);

            let alerts = quantities.iter().filter(|&&q| q <= DEFAULT_ALERT_QUANTITY).count();
            prop_assert_eq!(summary.low_stock_alerts.len(), alerts);
        }
    }
}
