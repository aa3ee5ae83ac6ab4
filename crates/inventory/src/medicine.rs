use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use medstock_core::{DomainResult, MedicineId};

/// A medicine in the catalogue, with its aggregate on-hand stock.
///
/// `stock` is the catalogue-level count used by the distribution workflow.
/// It is intentionally independent of the per-batch quantities tracked in
/// `medstock-stock`; nothing keeps the two in sync.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Medicine {
    pub id: MedicineId,
    pub name: String,
    pub dosage: String,
    pub manufacturer: String,
    pub category: String,
    pub stock: i32,
    pub expiration_date: NaiveDate,
    pub instructions: Option<String>,
}

/// Field set supplied when creating or fully overwriting a medicine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MedicineDraft {
    pub name: String,
    pub dosage: String,
    pub manufacturer: String,
    pub category: String,
    pub stock: i32,
    pub expiration_date: NaiveDate,
    pub instructions: Option<String>,
}

impl MedicineDraft {
    /// Check the field invariants; called by the service before any write.
    pub fn validate(&self) -> DomainResult<()> {
        if self.name.trim().is_empty() {
            return Err(medstock_core::DomainError::validation(
                "name must not be empty",
            ));
        }
        if self.stock < 0 {
            return Err(medstock_core::DomainError::validation(format!(
                "stock must not be negative, got {}",
                self.stock
            )));
        }
        Ok(())
    }
}

impl Medicine {
    /// Materialize a draft under a fresh identifier.
    pub fn from_draft(id: MedicineId, draft: MedicineDraft) -> Self {
        Self {
            id,
            name: draft.name,
            dosage: draft.dosage,
            manufacturer: draft.manufacturer,
            category: draft.category,
            stock: draft.stock,
            expiration_date: draft.expiration_date,
            instructions: draft.instructions,
        }
    }

    /// Strictly past its expiration date.
    pub fn is_expired(&self, today: NaiveDate) -> bool {
        self.expiration_date < today
    }

    /// Expires on or before `today + days` (inclusive boundary).
    pub fn expires_within(&self, today: NaiveDate, days: u32) -> bool {
        let horizon = today
            .checked_add_days(Days::new(u64::from(days)))
            .unwrap_or(NaiveDate::MAX);
        self.expiration_date <= horizon
    }

    /// Stock strictly below the caller-supplied threshold.
    pub fn is_low_stock(&self, threshold: i32) -> bool {
        self.stock < threshold
    }
}

/// Counts reported by the medicine summary endpoint.
///
/// Each count is derived from its own scan, mirroring the per-filter queries
/// the endpoints expose individually.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventorySummary {
    pub total: u64,
    pub expiring_soon: u64,
    pub expired: u64,
    pub low_stock: u64,
}
