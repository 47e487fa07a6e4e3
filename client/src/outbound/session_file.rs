//! File-backed session store built on the `session-cache` crate.

use camino::{Utf8Path, Utf8PathBuf};
use session_cache::{CachedSession, SessionCache, SessionCacheError};
use tracing::info;

use crate::domain::ports::{SessionStore, SessionStoreError, StoredSession};
use crate::domain::{AuthToken, Username};

/// Session store persisting `session.json` under one directory.
pub struct FileSessionStore {
    cache: SessionCache,
}

impl FileSessionStore {
    /// Open (creating when needed) the session directory.
    ///
    /// # Errors
    ///
    /// Returns [`SessionStoreError::Unavailable`] when the directory cannot
    /// be created or opened.
    pub fn open(root: impl AsRef<Utf8Path>) -> Result<Self, SessionStoreError> {
        let cache = SessionCache::open(root).map_err(map_cache_error)?;
        Ok(Self { cache })
    }

    fn file_path(&self) -> Utf8PathBuf {
        self.cache.file_path()
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<StoredSession, SessionStoreError> {
        let CachedSession { token, username } = self.cache.load().map_err(map_cache_error)?;
        Ok(StoredSession {
            token: token
                .filter(|value| !value.trim().is_empty())
                .map(AuthToken::new),
            username: username
                .filter(|value| !value.trim().is_empty())
                .map(Username::new),
        })
    }

    fn save(&self, token: &AuthToken, username: &Username) -> Result<(), SessionStoreError> {
        self.cache
            .store(&CachedSession::new(token.as_str(), username.as_ref()))
            .map_err(map_cache_error)?;
        info!(username = %username, path = %self.file_path(), "session cached");
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionStoreError> {
        self.cache.clear().map_err(map_cache_error)?;
        info!(path = %self.file_path(), "session cache cleared");
        Ok(())
    }
}

fn map_cache_error(err: SessionCacheError) -> SessionStoreError {
    match err {
        SessionCacheError::ParseError { .. } => SessionStoreError::corrupt(err.to_string()),
        other => SessionStoreError::unavailable(other.to_string()),
    }
}
