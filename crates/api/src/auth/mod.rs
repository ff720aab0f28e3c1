//! Admin authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`credentials`] -- Login secret verification behind [`credentials::CredentialVerifier`].
//! - [`session`] -- Opaque bearer-token sessions behind [`session::SessionStore`].

pub mod credentials;
pub mod password;
pub mod session;

/// The role every admin session carries.
pub const ADMIN_ROLE: &str = "admin";

/// An authenticated caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub role: &'static str,
}

impl Principal {
    pub fn admin() -> Self {
        Self { role: ADMIN_ROLE }
    }
}
