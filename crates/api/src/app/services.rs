//! Store selection and service wiring.

use std::sync::Arc;

use sqlx::PgPool;

use medstock_auth::Hs256TokenService;
use medstock_infra::{
    AuthService, BatchStore, DistributionService, DistributionStore, MedicineService,
    MedicineStore, MemoryStore, PostgresStore, StockService, StoreError, UserStore,
};

use crate::config::AppConfig;

/// Everything the handlers need, behind one `Arc`.
pub struct AppServices {
    pub auth: AuthService,
    pub medicines: MedicineService,
    pub stock: StockService,
    pub distributions: DistributionService,
}

impl AppServices {
    /// Wire all services against one store backend.
    pub fn from_store<S>(store: Arc<S>, tokens: Arc<Hs256TokenService>) -> Self
    where
        S: MedicineStore + BatchStore + DistributionStore + UserStore + 'static,
    {
        Self {
            auth: AuthService::new(store.clone(), tokens),
            medicines: MedicineService::new(store.clone()),
            stock: StockService::new(store.clone(), store.clone()),
            distributions: DistributionService::new(store.clone(), store),
        }
    }
}

/// Pick the store backend from configuration.
///
/// With `DATABASE_URL` set, connect to Postgres and apply the schema;
/// otherwise fall back to the in-memory store (dev/test).
pub async fn build_services(
    config: &AppConfig,
    tokens: Arc<Hs256TokenService>,
) -> Result<AppServices, StoreError> {
    match &config.database_url {
        Some(url) => {
            let pool = PgPool::connect(url).await?;
            let store = Arc::new(PostgresStore::new(pool));
            store.migrate().await?;
            tracing::info!("using Postgres store");
            Ok(AppServices::from_store(store, tokens))
        }
        None => {
            tracing::warn!("DATABASE_URL not set; using in-memory store (data is not durable)");
            Ok(AppServices::from_store(Arc::new(MemoryStore::new()), tokens))
        }
    }
}
