use serde::{Deserialize, Serialize};

use medstock_core::UserId;

/// Role granted to a user account.
///
/// "USER" accounts are the officers eligible to receive distributions;
/// "ADMIN" accounts manage the catalogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "ADMIN")]
    Admin,
    #[serde(rename = "USER")]
    User,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::User => "USER",
        }
    }
}

impl core::str::FromStr for Role {
    type Err = medstock_core::DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ADMIN" => Ok(Self::Admin),
            "USER" => Ok(Self::User),
            other => Err(medstock_core::DomainError::validation(format!(
                "unknown role: {other}"
            ))),
        }
    }
}

/// A user account.
///
/// `password_hash` is a PHC-format argon2 string; the plaintext never leaves
/// the login handler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: Role,
}
