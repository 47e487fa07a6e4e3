//! Driven port for the persisted `{token, username}` pair.
//!
//! The store is read once at start-up, written after a successful login,
//! signup, or profile change, and cleared on logout.

use std::sync::Mutex;

use super::define_port_error;
use crate::domain::{AuthToken, Username};

/// Values found in the store; either may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoredSession {
    /// Cached credential.
    pub token: Option<AuthToken>,
    /// Cached account name.
    pub username: Option<Username>,
}

define_port_error! {
    /// Errors surfaced by session store adapters.
    pub enum SessionStoreError {
        /// The backing storage could not be reached or written.
        Unavailable { message: String } =>
            "session store unavailable: {message}",
        /// Stored data exists but cannot be read back.
        Corrupt { message: String } =>
            "session store corrupt: {message}",
    }
}

/// Port for persisting the session pair across runs.
#[cfg_attr(test, mockall::automock)]
pub trait SessionStore: Send + Sync {
    /// Read the cached pair; a never-written store yields empty values.
    fn load(&self) -> Result<StoredSession, SessionStoreError>;

    /// Replace the cached pair.
    fn save(&self, token: &AuthToken, username: &Username) -> Result<(), SessionStoreError>;

    /// Remove both values.
    fn clear(&self) -> Result<(), SessionStoreError>;
}

/// In-memory store for tests and ephemeral runs.
#[derive(Debug, Default)]
pub struct FixtureSessionStore {
    inner: Mutex<StoredSession>,
}

impl FixtureSessionStore {
    /// Store pre-seeded with a pair.
    pub fn with_session(token: AuthToken, username: Username) -> Self {
        Self {
            inner: Mutex::new(StoredSession {
                token: Some(token),
                username: Some(username),
            }),
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, StoredSession>, SessionStoreError> {
        self.inner
            .lock()
            .map_err(|err| SessionStoreError::unavailable(err.to_string()))
    }
}

impl SessionStore for FixtureSessionStore {
    fn load(&self) -> Result<StoredSession, SessionStoreError> {
        Ok(self.lock()?.clone())
    }

    fn save(&self, token: &AuthToken, username: &Username) -> Result<(), SessionStoreError> {
        *self.lock()? = StoredSession {
            token: Some(token.clone()),
            username: Some(username.clone()),
        };
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionStoreError> {
        *self.lock()? = StoredSession::default();
        Ok(())
    }
}
