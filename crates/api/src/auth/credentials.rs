//! Admin login secret verification.

use std::sync::Arc;

use async_trait::async_trait;
use rentals_core::error::CoreError;
use sha2::{Digest, Sha256};

use super::password::verify_password;
use super::Principal;
use crate::config::AdminCredential;

/// Message returned for every failed login, whatever the cause.
const INVALID_PASSWORD: &str = "Invalid password";

/// Checks a login secret and yields the principal it grants.
#[async_trait]
pub trait CredentialVerifier: Send + Sync {
    async fn verify(&self, secret: &str) -> Result<Principal, CoreError>;
}

/// Build the verifier matching the configured credential.
pub fn from_config(credential: &AdminCredential) -> Arc<dyn CredentialVerifier> {
    match credential {
        AdminCredential::Hash(hash) => Arc::new(Argon2PasswordVerifier::new(hash.clone())),
        AdminCredential::Password(password) => {
            Arc::new(StaticPasswordVerifier::new(password.as_str()))
        }
    }
}

/// Compares against a shared plaintext secret.
///
/// Only the SHA-256 digest of the secret is kept, and digests are compared
/// without early exit so timing does not leak a matching prefix.
pub struct StaticPasswordVerifier {
    digest: [u8; 32],
}

impl StaticPasswordVerifier {
    pub fn new(password: &str) -> Self {
        Self {
            digest: sha256(password),
        }
    }
}

#[async_trait]
impl CredentialVerifier for StaticPasswordVerifier {
    async fn verify(&self, secret: &str) -> Result<Principal, CoreError> {
        if constant_time_eq(&self.digest, &sha256(secret)) {
            Ok(Principal::admin())
        } else {
            Err(CoreError::Unauthorized(INVALID_PASSWORD.into()))
        }
    }
}

/// Verifies against an Argon2 PHC hash.
///
/// Argon2 is deliberately slow, so verification runs on the blocking pool.
pub struct Argon2PasswordVerifier {
    hash: String,
}

impl Argon2PasswordVerifier {
    pub fn new(hash: String) -> Self {
        Self { hash }
    }
}

#[async_trait]
impl CredentialVerifier for Argon2PasswordVerifier {
    async fn verify(&self, secret: &str) -> Result<Principal, CoreError> {
        let hash = self.hash.clone();
        let secret = secret.to_owned();
        let verified = tokio::task::spawn_blocking(move || verify_password(&secret, &hash))
            .await
            .map_err(|e| CoreError::Internal(format!("Password verification task failed: {e}")))?
            .map_err(|e| CoreError::Internal(format!("Password verification error: {e}")))?;

        if verified {
            Ok(Principal::admin())
        } else {
            Err(CoreError::Unauthorized(INVALID_PASSWORD.into()))
        }
    }
}

fn sha256(value: &str) -> [u8; 32] {
    Sha256::digest(value.as_bytes()).into()
}

fn constant_time_eq(a: &[u8; 32], b: &[u8; 32]) -> bool {
    a.iter().zip(b.iter()).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
