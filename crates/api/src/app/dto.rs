//! Request/response DTOs.
//!
//! The wire format uses camelCase field names; domain types stay snake_case.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use medstock_auth::{Role, User};
use medstock_core::{BatchId, DistributionId, MedicineId, UserId};
use medstock_distribution::Distribution;
use medstock_inventory::{InventorySummary, Medicine, MedicineDraft};
use medstock_stock::{BatchDraft, StockBatch, StockSummary};

// ---- auth ----

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

// ---- medicines ----

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicineBody {
    pub name: String,
    pub dosage: String,
    pub manufacturer: String,
    pub category: String,
    pub stock: i32,
    pub expiration_date: NaiveDate,
    #[serde(default)]
    pub instructions: Option<String>,
}

impl MedicineBody {
    pub fn into_draft(self) -> MedicineDraft {
        MedicineDraft {
            name: self.name,
            dosage: self.dosage,
            manufacturer: self.manufacturer,
            category: self.category,
            stock: self.stock,
            expiration_date: self.expiration_date,
            instructions: self.instructions,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicineDto {
    pub id: MedicineId,
    pub name: String,
    pub dosage: String,
    pub manufacturer: String,
    pub category: String,
    pub stock: i32,
    pub expiration_date: NaiveDate,
    pub instructions: Option<String>,
}

impl From<Medicine> for MedicineDto {
    fn from(m: Medicine) -> Self {
        Self {
            id: m.id,
            name: m.name,
            dosage: m.dosage,
            manufacturer: m.manufacturer,
            category: m.category,
            stock: m.stock,
            expiration_date: m.expiration_date,
            instructions: m.instructions,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventorySummaryDto {
    pub total: u64,
    pub expiring_soon: u64,
    pub expired: u64,
    pub low_stock: u64,
}

impl From<InventorySummary> for InventorySummaryDto {
    fn from(s: InventorySummary) -> Self {
        Self {
            total: s.total,
            expiring_soon: s.expiring_soon,
            expired: s.expired,
            low_stock: s.low_stock,
        }
    }
}

// ---- stock batches ----

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchBody {
    pub medicine_id: MedicineId,
    pub quantity: i32,
    pub batch_number: String,
    pub expiry_date: NaiveDate,
    pub received_date: NaiveDate,
    pub supplier: String,
    pub unit_price: f64,
    pub reorder_level: i32,
}

impl BatchBody {
    pub fn into_draft(self) -> BatchDraft {
        BatchDraft {
            medicine_id: self.medicine_id,
            quantity: self.quantity,
            batch_number: self.batch_number,
            expiry_date: self.expiry_date,
            received_date: self.received_date,
            supplier: self.supplier,
            unit_price: self.unit_price,
            reorder_level: self.reorder_level,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchDto {
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

impl From<StockBatch> for BatchDto {
    fn from(b: StockBatch) -> Self {
        Self {
            id: b.id,
            medicine_id: b.medicine_id,
            quantity: b.quantity,
            batch_number: b.batch_number,
            expiry_date: b.expiry_date,
            received_date: b.received_date,
            supplier: b.supplier,
            unit_price: b.unit_price,
            reorder_level: b.reorder_level,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StockSummaryDto {
    pub total_items: i64,
    pub total_value: f64,
    pub low_stock_alerts: Vec<BatchDto>,
}

impl From<StockSummary> for StockSummaryDto {
    fn from(s: StockSummary) -> Self {
        Self {
            total_items: s.total_items,
            total_value: s.total_value,
            low_stock_alerts: s.low_stock_alerts.into_iter().map(BatchDto::from).collect(),
        }
    }
}

// ---- distributions ----

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistributeBody {
    pub officer_id: UserId,
    pub medicine_id: MedicineId,
    pub quantity: i32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DistributionDto {
    pub id: DistributionId,
    pub officer_id: UserId,
    pub medicine_id: MedicineId,
    pub quantity: i32,
    pub date: NaiveDate,
    pub status: String,
}

impl From<Distribution> for DistributionDto {
    fn from(d: Distribution) -> Self {
        Self {
            id: d.id,
            officer_id: d.officer_id,
            medicine_id: d.medicine_id,
            quantity: d.quantity,
            date: d.date,
            status: d.status.as_str().to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct OfficerDto {
    pub id: UserId,
    pub username: String,
    pub role: Role,
}

impl From<User> for OfficerDto {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            username: u.username,
            role: u.role,
        }
    }
}

// ---- query parameters ----

fn default_days() -> u32 {
    30
}

fn default_threshold() -> i32 {
    10
}

#[derive(Debug, Deserialize)]
pub struct SummaryQuery {
    #[serde(default = "default_days")]
    pub days: u32,
    #[serde(default = "default_threshold")]
    pub threshold: i32,
}

#[derive(Debug, Deserialize)]
pub struct DaysQuery {
    #[serde(default = "default_days")]
    pub days: u32,
}

#[derive(Debug, Deserialize)]
pub struct ThresholdQuery {
    #[serde(default = "default_threshold")]
    pub threshold: i32,
}
