use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::NaiveDate;

use medstock_auth::{Role, User};
use medstock_core::{BatchId, DistributionId, DomainError, MedicineId, UserId};
use medstock_distribution::{Distribution, DistributionStatus};
use medstock_inventory::Medicine;
use medstock_stock::StockBatch;

use super::r#trait::{BatchStore, DistributionStore, MedicineStore, StoreError, UserStore};

#[derive(Debug, Default)]
struct Tables {
    medicines: HashMap<MedicineId, Medicine>,
    batches: HashMap<BatchId, StockBatch>,
    users: HashMap<UserId, User>,
    distributions: Vec<Distribution>,
}

/// In-memory store backed by a single mutex over all tables.
///
/// Intended for tests/dev. The single lock is what makes `distribute` atomic:
/// the stock check, decrement and history insert happen under one guard, so
/// no interleaving can observe a partial write or drive stock negative.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Tables>, StoreError> {
        self.tables
            .lock()
            .map_err(|_| StoreError::backend("lock poisoned"))
    }
}

fn sorted_by_id<T, I: Ord>(mut items: Vec<T>, key: impl Fn(&T) -> I) -> Vec<T> {
    // UUIDv7 ids are time-ordered, so this yields insertion order.
    items.sort_by_key(key);
    items
}

#[async_trait]
impl MedicineStore for MemoryStore {
    async fn insert_medicine(&self, medicine: Medicine) -> Result<Medicine, StoreError> {
        let mut tables = self.lock()?;
        tables.medicines.insert(medicine.id, medicine.clone());
        Ok(medicine)
    }

    async fn find_medicine(&self, id: MedicineId) -> Result<Option<Medicine>, StoreError> {
        Ok(self.lock()?.medicines.get(&id).cloned())
    }

    async fn list_medicines(&self) -> Result<Vec<Medicine>, StoreError> {
        let items = self.lock()?.medicines.values().cloned().collect();
        Ok(sorted_by_id(items, |m: &Medicine| *m.id.as_uuid()))
    }

    async fn update_medicine(&self, medicine: Medicine) -> Result<Medicine, StoreError> {
        let mut tables = self.lock()?;
        match tables.medicines.get_mut(&medicine.id) {
            Some(existing) => {
                *existing = medicine.clone();
                Ok(medicine)
            }
            None => Err(DomainError::not_found("medicine").into()),
        }
    }

    async fn delete_medicine(&self, id: MedicineId) -> Result<(), StoreError> {
        self.lock()?.medicines.remove(&id);
        Ok(())
    }

    async fn medicines_expiring_on_or_before(
        &self,
        date: NaiveDate,
    ) -> Result<Vec<Medicine>, StoreError> {
        let items = self
            .lock()?
            .medicines
            .values()
            .filter(|m| m.expiration_date <= date)
            .cloned()
            .collect();
        Ok(sorted_by_id(items, |m: &Medicine| *m.id.as_uuid()))
    }

    async fn medicines_expired_before(
        &self,
        date: NaiveDate,
    ) -> Result<Vec<Medicine>, StoreError> {
        let items = self
            .lock()?
            .medicines
            .values()
            .filter(|m| m.expiration_date < date)
            .cloned()
            .collect();
        Ok(sorted_by_id(items, |m: &Medicine| *m.id.as_uuid()))
    }

    async fn medicines_low_stock(&self, threshold: i32) -> Result<Vec<Medicine>, StoreError> {
        let items = self
            .lock()?
            .medicines
            .values()
            .filter(|m| m.stock < threshold)
            .cloned()
            .collect();
        Ok(sorted_by_id(items, |m: &Medicine| *m.id.as_uuid()))
    }

    async fn count_medicines(&self) -> Result<u64, StoreError> {
        Ok(self.lock()?.medicines.len() as u64)
    }
}

#[async_trait]
impl BatchStore for MemoryStore {
    async fn insert_batch(&self, batch: StockBatch) -> Result<StockBatch, StoreError> {
        let mut tables = self.lock()?;
        tables.batches.insert(batch.id, batch.clone());
        Ok(batch)
    }

    async fn find_batch(&self, id: BatchId) -> Result<Option<StockBatch>, StoreError> {
        Ok(self.lock()?.batches.get(&id).cloned())
    }

    async fn list_batches(&self) -> Result<Vec<StockBatch>, StoreError> {
        let items = self.lock()?.batches.values().cloned().collect();
        Ok(sorted_by_id(items, |b: &StockBatch| *b.id.as_uuid()))
    }

    async fn update_batch(&self, batch: StockBatch) -> Result<StockBatch, StoreError> {
        let mut tables = self.lock()?;
        match tables.batches.get_mut(&batch.id) {
            Some(existing) => {
                *existing = batch.clone();
                Ok(batch)
            }
            None => Err(DomainError::not_found("stock").into()),
        }
    }

    async fn delete_batch(&self, id: BatchId) -> Result<(), StoreError> {
        self.lock()?.batches.remove(&id);
        Ok(())
    }

    async fn batches_expiring_on_or_before(
        &self,
        date: NaiveDate,
    ) -> Result<Vec<StockBatch>, StoreError> {
        let items = self
            .lock()?
            .batches
            .values()
            .filter(|b| b.expiry_date <= date)
            .cloned()
            .collect();
        Ok(sorted_by_id(items, |b: &StockBatch| *b.id.as_uuid()))
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn insert_user(&self, user: User) -> Result<User, StoreError> {
        let mut tables = self.lock()?;
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        Ok(self
            .lock()?
            .users
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn list_users_by_role(&self, role: Role) -> Result<Vec<User>, StoreError> {
        let items = self
            .lock()?
            .users
            .values()
            .filter(|u| u.role == role)
            .cloned()
            .collect();
        Ok(sorted_by_id(items, |u: &User| *u.id.as_uuid()))
    }

    async fn count_users(&self) -> Result<u64, StoreError> {
        Ok(self.lock()?.users.len() as u64)
    }
}

#[async_trait]
impl DistributionStore for MemoryStore {
    async fn list_distributions(&self) -> Result<Vec<Distribution>, StoreError> {
        Ok(self.lock()?.distributions.clone())
    }

    async fn distribute(
        &self,
        officer_id: UserId,
        medicine_id: MedicineId,
        quantity: i32,
        date: NaiveDate,
    ) -> Result<Distribution, StoreError> {
        let mut tables = self.lock()?;

        if !tables.users.contains_key(&officer_id) {
            return Err(DomainError::not_found("officer").into());
        }

        let medicine = tables
            .medicines
            .get_mut(&medicine_id)
            .ok_or_else(|| DomainError::not_found("medicine"))?;

        if medicine.stock < quantity {
            return Err(DomainError::InsufficientStock {
                requested: quantity,
                available: medicine.stock,
            }
            .into());
        }

        medicine.stock -= quantity;

        let distribution = Distribution {
            id: DistributionId::new(),
            officer_id,
            medicine_id,
            quantity,
            date,
            status: DistributionStatus::Completed,
        };
        tables.distributions.push(distribution.clone());

        Ok(distribution)
    }
}
