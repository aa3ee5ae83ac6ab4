use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;

use medstock_auth::{Role, User};
use medstock_core::{BatchId, DomainError, MedicineId, UserId};
use medstock_distribution::Distribution;
use medstock_inventory::Medicine;
use medstock_stock::StockBatch;

/// Store-level error.
///
/// Domain failures (missing rows, stock invariants) pass through as
/// [`DomainError`]; backend failures (connection loss, poisoned locks) are
/// collapsed into `Backend` and never shown to API clients verbatim.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("storage backend failure: {0}")]
    Backend(String),
}

impl StoreError {
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        Self::Backend(e.to_string())
    }
}

/// Point lookups, scans and writes over the medicine catalogue.
#[async_trait]
pub trait MedicineStore: Send + Sync {
    async fn insert_medicine(&self, medicine: Medicine) -> Result<Medicine, StoreError>;

    async fn find_medicine(&self, id: MedicineId) -> Result<Option<Medicine>, StoreError>;

    async fn list_medicines(&self) -> Result<Vec<Medicine>, StoreError>;

    /// Full-row overwrite. `DomainError::NotFound("medicine")` if the id is
    /// unknown.
    async fn update_medicine(&self, medicine: Medicine) -> Result<Medicine, StoreError>;

    async fn delete_medicine(&self, id: MedicineId) -> Result<(), StoreError>;

    /// Medicines with `expiration_date <= date`.
    async fn medicines_expiring_on_or_before(
        &self,
        date: NaiveDate,
    ) -> Result<Vec<Medicine>, StoreError>;

    /// Medicines with `expiration_date < date`.
    async fn medicines_expired_before(&self, date: NaiveDate)
        -> Result<Vec<Medicine>, StoreError>;

    /// Medicines with `stock < threshold`.
    async fn medicines_low_stock(&self, threshold: i32) -> Result<Vec<Medicine>, StoreError>;

    async fn count_medicines(&self) -> Result<u64, StoreError>;
}

/// Point lookups, scans and writes over stock batches.
#[async_trait]
pub trait BatchStore: Send + Sync {
    async fn insert_batch(&self, batch: StockBatch) -> Result<StockBatch, StoreError>;

    async fn find_batch(&self, id: BatchId) -> Result<Option<StockBatch>, StoreError>;

    async fn list_batches(&self) -> Result<Vec<StockBatch>, StoreError>;

    /// Full-row overwrite. `DomainError::NotFound("stock")` if the id is
    /// unknown.
    async fn update_batch(&self, batch: StockBatch) -> Result<StockBatch, StoreError>;

    async fn delete_batch(&self, id: BatchId) -> Result<(), StoreError>;

    /// Batches with `expiry_date <= date`.
    async fn batches_expiring_on_or_before(
        &self,
        date: NaiveDate,
    ) -> Result<Vec<StockBatch>, StoreError>;
}

/// User accounts (identity store).
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn insert_user(&self, user: User) -> Result<User, StoreError>;

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError>;

    async fn list_users_by_role(&self, role: Role) -> Result<Vec<User>, StoreError>;

    async fn count_users(&self) -> Result<u64, StoreError>;
}

/// Distribution history plus the one stateful workflow.
#[async_trait]
pub trait DistributionStore: Send + Sync {
    async fn list_distributions(&self) -> Result<Vec<Distribution>, StoreError>;

    /// Atomically check the officer and medicine exist, verify sufficient
    /// stock, decrement `Medicine::stock` by `quantity` and record a
    /// "Completed" distribution dated `date`.
    ///
    /// Every implementation must make the whole sequence a single atomic
    /// unit: on any failure the store is left untouched, and concurrent calls
    /// can never drive stock below zero.
    async fn distribute(
        &self,
        officer_id: UserId,
        medicine_id: MedicineId,
        quantity: i32,
        date: NaiveDate,
    ) -> Result<Distribution, StoreError>;
}
