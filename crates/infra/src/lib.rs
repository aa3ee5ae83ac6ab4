//! Infrastructure layer: durable stores and the services that orchestrate
//! them.
//!
//! Two store backends share one set of traits: an in-memory store for tests
//! and development, and a Postgres store for production.

pub mod services;
pub mod store;


pub use services::{AuthService, DistributionService, MedicineService, StockService};
pub use store::{
    BatchStore, DistributionStore, MedicineStore, MemoryStore, PostgresStore, StoreError,
    UserStore,
};
