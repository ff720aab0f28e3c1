//! Opaque bearer-token sessions for the admin surface.
//!
//! Tokens are 32 random bytes, hex-encoded. The store maps each token to
//! its expiry; an expired token is dropped the first time it is presented
//! and in bulk by [`SessionStore::purge_expired`].

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use rand::Rng;
use rentals_core::types::Timestamp;
use tokio::sync::RwLock;

use super::Principal;

/// Number of random bytes behind each token (64 hex chars).
const TOKEN_BYTES: usize = 32;

/// A freshly issued session.
#[derive(Debug, Clone)]
pub struct IssuedSession {
    pub token: String,
    pub expires_at: Timestamp,
}

/// Storage for admin sessions.
///
/// Shared through `AppState` as `Arc<dyn SessionStore>`.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Create a session that lives for `ttl`.
    async fn issue(&self, ttl: Duration) -> IssuedSession;

    /// Resolve a token to its principal. Unknown and expired tokens yield `None`.
    async fn validate(&self, token: &str) -> Option<Principal>;

    /// Forget a token. Returns `true` if it was known.
    async fn revoke(&self, token: &str) -> bool;

    /// Drop every expired session, returning how many were removed.
    async fn purge_expired(&self) -> usize;
}

/// Process-local [`SessionStore`]. Sessions do not survive a restart.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<String, Timestamp>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of sessions currently held, expired or not.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn issue(&self, ttl: Duration) -> IssuedSession {
        let expires_at = Utc::now() + ttl;
        let mut sessions = self.sessions.write().await;
        let token = loop {
            let candidate = generate_token();
            if !sessions.contains_key(&candidate) {
                break candidate;
            }
        };
        sessions.insert(token.clone(), expires_at);
        IssuedSession { token, expires_at }
    }

    async fn validate(&self, token: &str) -> Option<Principal> {
        let expires_at = *self.sessions.read().await.get(token)?;
        if expires_at > Utc::now() {
            return Some(Principal::admin());
        }

        // Re-check under the write lock: the token may have been reissued
        // or revoked in between.
        let mut sessions = self.sessions.write().await;
        if sessions.get(token).is_some_and(|exp| *exp <= Utc::now()) {
            sessions.remove(token);
            tracing::debug!("Removed expired admin session");
        }
        None
    }

    async fn revoke(&self, token: &str) -> bool {
        self.sessions.write().await.remove(token).is_some()
    }

    async fn purge_expired(&self) -> usize {
        let now = Utc::now();
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, expires_at| *expires_at > now);
        before - sessions.len()
    }
}

/// Generate a random hex token.
fn generate_token() -> String {
    let bytes: [u8; TOKEN_BYTES] = rand::rng().random();
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}
