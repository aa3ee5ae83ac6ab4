use std::sync::Arc;

use medstock_auth::{hash_password, verify_password, Hs256TokenService, Role, User};
use medstock_core::{DomainError, UserId};

use crate::store::{StoreError, UserStore};

/// Username/password login issuing signed session tokens.
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserStore>,
    tokens: Arc<Hs256TokenService>,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserStore>, tokens: Arc<Hs256TokenService>) -> Self {
        Self { users, tokens }
    }

    /// Verify credentials and issue a token.
    ///
    /// Unknown username and wrong password both collapse into
    /// `DomainError::Unauthorized`; callers see one uniform failure.
    pub async fn login(&self, username: &str, password: &str) -> Result<String, StoreError> {
        let user = self.users.find_user_by_username(username).await?;

        let verified = match &user {
            Some(u) => verify_password(password, &u.password_hash),
            None => false,
        };
        if !verified {
            tracing::warn!(username, "login rejected");
            return Err(DomainError::Unauthorized.into());
        }

        self.tokens
            .issue(username)
            .map_err(|e| StoreError::backend(format!("token issuance failed: {e}")))
    }

    /// Seed the bootstrap admin account, but only into an empty user table.
    ///
    /// Once any account exists the configured credentials are ignored, so a
    /// stale `ADMIN_PASSWORD` in the environment cannot overwrite or
    /// resurrect accounts on restart. Returns the created user, or `None`
    /// when seeding was skipped.
    pub async fn bootstrap_admin(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<User>, StoreError> {
        if self.users.count_users().await? > 0 {
            tracing::debug!("user table not empty; skipping bootstrap admin");
            return Ok(None);
        }
        let user = self.ensure_user(username, password, Role::Admin).await?;
        Ok(Some(user))
    }

    /// Create the account if the username is not taken yet (used by the
    /// bootstrap path and test fixtures).
    pub async fn ensure_user(
        &self,
        username: &str,
        password: &str,
        role: Role,
    ) -> Result<User, StoreError> {
        if let Some(existing) = self.users.find_user_by_username(username).await? {
            return Ok(existing);
        }

        let user = User {
            id: UserId::new(),
            username: username.to_string(),
            password_hash: hash_password(password)
                .map_err(|e| StoreError::backend(e.to_string()))?,
            role,
        };
        let user = self.users.insert_user(user).await?;
        tracing::info!(username = %user.username, role = user.role.as_str(), "user created");
        Ok(user)
    }
}
