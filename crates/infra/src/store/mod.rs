//! Durable store traits and their backends.

mod memory;
mod postgres;
mod r#trait;

pub use memory::MemoryStore;
pub use postgres::PostgresStore;
pub use r#trait::{BatchStore, DistributionStore, MedicineStore, StoreError, UserStore};
