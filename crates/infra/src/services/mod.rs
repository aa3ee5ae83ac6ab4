//! Domain services: thin orchestration over the store traits.
//!
//! Handlers in `medstock-api` call these; the services own validation,
//! date arithmetic and logging, while the stores own durability and the
//! atomicity of the distribution workflow.

mod auth;
mod distributions;
mod medicines;
mod stock;

pub use auth::AuthService;
pub use distributions::DistributionService;
pub use medicines::MedicineService;
pub use stock::StockService;
