//! `medstock-auth` — authentication boundary: session tokens, users,
//! password hashing.
//!
//! This crate is intentionally decoupled from HTTP and storage.

pub mod claims;
pub mod password;
pub mod token;
pub mod user;

pub use claims::Claims;
pub use password::{hash_password, verify_password, PasswordError};
pub use token::{Hs256TokenService, TokenError, TokenVerifier, TOKEN_TTL_SECS};
pub use user::{Role, User};
