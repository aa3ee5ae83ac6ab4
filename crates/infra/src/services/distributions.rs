use std::sync::Arc;

use chrono::Utc;

use medstock_auth::{Role, User};
use medstock_core::{DomainError, MedicineId, UserId};
use medstock_distribution::Distribution;

use crate::store::{DistributionStore, StoreError, UserStore};

/// The one stateful workflow: hand stock to an officer and record it.
#[derive(Clone)]
pub struct DistributionService {
    distributions: Arc<dyn DistributionStore>,
    users: Arc<dyn UserStore>,
}

impl DistributionService {
    pub fn new(distributions: Arc<dyn DistributionStore>, users: Arc<dyn UserStore>) -> Self {
        Self {
            distributions,
            users,
        }
    }

    /// Distribute `quantity` units of a medicine to an officer.
    ///
    /// The store performs the officer/medicine lookups, the stock check, the
    /// decrement and the history insert as one atomic unit; on any failure
    /// nothing is mutated.
    pub async fn distribute(
        &self,
        officer_id: UserId,
        medicine_id: MedicineId,
        quantity: i32,
    ) -> Result<Distribution, StoreError> {
        if quantity <= 0 {
            return Err(DomainError::validation("quantity must be positive").into());
        }

        let distribution = self
            .distributions
            .distribute(officer_id, medicine_id, quantity, Utc::now().date_naive())
            .await?;

        tracing::info!(
            distribution_id = %distribution.id,
            officer_id = %officer_id,
            medicine_id = %medicine_id,
            quantity,
            "medicine distributed"
        );
        Ok(distribution)
    }

    /// Full distribution history.
    pub async fn history(&self) -> Result<Vec<Distribution>, StoreError> {
        self.distributions.list_distributions().await
    }

    /// Users eligible to receive distributions (role "USER").
    pub async fn officers(&self) -> Result<Vec<User>, StoreError> {
        self.users.list_users_by_role(Role::User).await
    }
}
