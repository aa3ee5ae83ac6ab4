use std::sync::Arc;

use chrono::{Days, NaiveDate, Utc};

use medstock_core::MedicineId;
use medstock_inventory::{InventorySummary, Medicine, MedicineDraft};

use crate::store::{MedicineStore, StoreError};

/// CRUD plus derived views over the medicine catalogue.
#[derive(Clone)]
pub struct MedicineService {
    store: Arc<dyn MedicineStore>,
}

impl MedicineService {
    pub fn new(store: Arc<dyn MedicineStore>) -> Self {
        Self { store }
    }

    fn today() -> NaiveDate {
        Utc::now().date_naive()
    }

    fn horizon(days: u32) -> NaiveDate {
        Self::today()
            .checked_add_days(Days::new(u64::from(days)))
            .unwrap_or(NaiveDate::MAX)
    }

    pub async fn create(&self, draft: MedicineDraft) -> Result<Medicine, StoreError> {
        draft.validate()?;
        let medicine = Medicine::from_draft(MedicineId::new(), draft);
        let medicine = self.store.insert_medicine(medicine).await?;
        tracing::info!(medicine_id = %medicine.id, name = %medicine.name, "medicine created");
        Ok(medicine)
    }

    pub async fn list(&self) -> Result<Vec<Medicine>, StoreError> {
        self.store.list_medicines().await
    }

    /// Full overwrite of every field; fails with `NotFound("medicine")` if
    /// the id is unknown.
    pub async fn update(
        &self,
        id: MedicineId,
        draft: MedicineDraft,
    ) -> Result<Medicine, StoreError> {
        draft.validate()?;
        self.store
            .update_medicine(Medicine::from_draft(id, draft))
            .await
    }

    pub async fn delete(&self, id: MedicineId) -> Result<(), StoreError> {
        self.store.delete_medicine(id).await
    }

    /// Medicines expiring on or before `today + days`.
    pub async fn expiring_soon(&self, days: u32) -> Result<Vec<Medicine>, StoreError> {
        self.store
            .medicines_expiring_on_or_before(Self::horizon(days))
            .await
    }

    /// Medicines strictly past their expiration date.
    pub async fn expired(&self) -> Result<Vec<Medicine>, StoreError> {
        self.store.medicines_expired_before(Self::today()).await
    }

    /// Medicines with stock strictly below `threshold`.
    pub async fn low_stock(&self, threshold: i32) -> Result<Vec<Medicine>, StoreError> {
        self.store.medicines_low_stock(threshold).await
    }

    /// Dashboard counts. Four separate scans rather than one aggregate
    /// query; the counts always agree with the individual filter endpoints.
    pub async fn summary(&self, days: u32, threshold: i32) -> Result<InventorySummary, StoreError> {
        let total = self.store.count_medicines().await?;
        let expiring_soon = self.expiring_soon(days).await?.len() as u64;
        let expired = self.expired().await?.len() as u64;
        let low_stock = self.low_stock(threshold).await?.len() as u64;

        Ok(InventorySummary {
            total,
            expiring_soon,
            expired,
            low_stock,
        })
    }
}
