//! Authenticated session state.
//!
//! The session slot is the only state touched from two contexts: the
//! foreground (login) and the heartbeat task (invalidation on auth
//! failure). The whole value is swapped under an async lock, so no reader
//! can observe a token mid-update.

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

/// A live session issued by a successful login.
#[derive(Debug, Clone)]
pub(crate) struct Session {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Shared slot holding the current session, if any.
#[derive(Debug, Default)]
pub(crate) struct SessionSlot {
    inner: RwLock<Option<Session>>,
}

impl SessionSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs a fresh session, replacing any previous one.
    pub async fn set(&self, session: Session) {
        *self.inner.write().await = Some(session);
    }

    /// Drops the session. Idempotent.
    pub async fn clear(&self) {
        *self.inner.write().await = None;
    }

    /// The current token, cloned out so the lock is never held across I/O.
    pub async fn token(&self) -> Option<String> {
        self.inner.read().await.as_ref().map(|s| s.token.clone())
    }

    /// When the current session expires, if one exists.
    pub async fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.inner.read().await.as_ref().map(|s| s.expires_at)
    }

    /// Whether a login has succeeded and not been invalidated since.
    pub async fn is_authenticated(&self) -> bool {
        self.inner.read().await.is_some()
    }
}
