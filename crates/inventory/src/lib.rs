//! `medstock-inventory` — medicine catalogue domain.
//!
//! Pure domain types and date/stock predicates; persistence lives in
//! `medstock-infra`.

pub mod medicine;

pub use medicine::{InventorySummary, Medicine, MedicineDraft};
