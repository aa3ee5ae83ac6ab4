/// Authenticated identity for a request.
///
/// Inserted by the auth middleware; must be present for all protected routes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    subject: String,
}

impl AuthContext {
    pub fn new(subject: String) -> Self {
        Self { subject }
    }

    /// Username the session token was issued for.
    pub fn subject(&self) -> &str {
        &self.subject
    }
}
