use std::sync::Arc;

use chrono::{Days, NaiveDate, Utc};

use medstock_core::{BatchId, DomainError};
use medstock_stock::{BatchDraft, StockBatch, StockSummary, DEFAULT_ALERT_QUANTITY};

use crate::store::{BatchStore, MedicineStore, StoreError};

/// CRUD over stock batches, each tied to an existing medicine.
#[derive(Clone)]
pub struct StockService {
    batches: Arc<dyn BatchStore>,
    medicines: Arc<dyn MedicineStore>,
    alert_quantity: i32,
}

impl StockService {
    pub fn new(batches: Arc<dyn BatchStore>, medicines: Arc<dyn MedicineStore>) -> Self {
        Self {
            batches,
            medicines,
            alert_quantity: DEFAULT_ALERT_QUANTITY,
        }
    }

    /// Override the summary's low-stock alert threshold (default 5,
    /// inclusive). Kept separate from the medicine endpoints' caller-supplied
    /// threshold on purpose.
    pub fn with_alert_quantity(mut self, alert_quantity: i32) -> Self {
        self.alert_quantity = alert_quantity;
        self
    }

    async fn require_medicine(&self, draft: &BatchDraft) -> Result<(), StoreError> {
        if self
            .medicines
            .find_medicine(draft.medicine_id)
            .await?
            .is_none()
        {
            return Err(DomainError::not_found("medicine").into());
        }
        Ok(())
    }

    pub async fn receive(&self, draft: BatchDraft) -> Result<StockBatch, StoreError> {
        draft.validate()?;
        self.require_medicine(&draft).await?;
        let batch = StockBatch::from_draft(BatchId::new(), draft);
        let batch = self.batches.insert_batch(batch).await?;
        tracing::info!(
            batch_id = %batch.id,
            medicine_id = %batch.medicine_id,
            quantity = batch.quantity,
            "stock batch received"
        );
        Ok(batch)
    }

    pub async fn get(&self, id: BatchId) -> Result<StockBatch, StoreError> {
        self.batches
            .find_batch(id)
            .await?
            .ok_or_else(|| DomainError::not_found("stock").into())
    }

    pub async fn list(&self) -> Result<Vec<StockBatch>, StoreError> {
        self.batches.list_batches().await
    }

    /// Full overwrite; the referenced medicine must exist.
    pub async fn update(&self, id: BatchId, draft: BatchDraft) -> Result<StockBatch, StoreError> {
        draft.validate()?;
        self.require_medicine(&draft).await?;
        self.batches
            .update_batch(StockBatch::from_draft(id, draft))
            .await
    }

    pub async fn delete(&self, id: BatchId) -> Result<(), StoreError> {
        self.batches.delete_batch(id).await
    }

    /// Batches expiring on or before `today + days`.
    pub async fn expiring_within(&self, days: u32) -> Result<Vec<StockBatch>, StoreError> {
        let horizon = Utc::now()
            .date_naive()
            .checked_add_days(Days::new(u64::from(days)))
            .unwrap_or(NaiveDate::MAX);
        self.batches.batches_expiring_on_or_before(horizon).await
    }

    pub async fn summary(&self) -> Result<StockSummary, StoreError> {
        let batches = self.batches.list_batches().await?;
        Ok(StockSummary::compute(&batches, self.alert_quantity))
    }
}
