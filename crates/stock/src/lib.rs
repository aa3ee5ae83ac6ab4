//! `medstock-stock` — received stock batches (lots) per medicine.
//!
//! Batches carry their own expiry, supplier and pricing. Batch quantities are
//! tracked independently of the catalogue-level `Medicine::stock` count.

pub mod batch;

pub use batch::{BatchDraft, StockBatch, StockSummary, DEFAULT_ALERT_QUANTITY};
