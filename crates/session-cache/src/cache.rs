//! The session file and its two values.

use std::fmt;
use std::io;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs::Dir};
use serde::{Deserialize, Serialize};

use crate::atomic_io::write_atomic;
use crate::error::SessionCacheError;

/// File name used for the cached session inside the cache directory.
pub const SESSION_FILE_NAME: &str = "session.json";

/// The persisted `{token, username}` pair.
///
/// Either value may be missing: a file written by hand, or by an older
/// client, is still readable. Callers decide what a partial pair means.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedSession {
    /// Opaque credential issued by the remote API.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    /// Username the token was issued to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

impl CachedSession {
    /// Build a complete pair.
    pub fn new(token: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            username: Some(username.into()),
        }
    }

    /// Return `true` when neither value is present.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.token.is_none() && self.username.is_none()
    }
}

impl fmt::Debug for CachedSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CachedSession")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("username", &self.username)
            .finish()
    }
}

/// Handle on a cache directory holding at most one session file.
#[derive(Debug)]
pub struct SessionCache {
    dir: Dir,
    root: Utf8PathBuf,
}

impl SessionCache {
    /// Open the cache rooted at `root`, creating the directory when missing.
    ///
    /// # Errors
    ///
    /// Returns [`SessionCacheError::OpenError`] when the directory cannot be
    /// created or opened.
    pub fn open(root: impl AsRef<Utf8Path>) -> Result<Self, SessionCacheError> {
        let root = root.as_ref();
        let open_error = |err: io::Error| SessionCacheError::OpenError {
            path: root.to_path_buf(),
            message: err.to_string(),
        };
        Dir::create_ambient_dir_all(root, ambient_authority()).map_err(open_error)?;
        let dir = Dir::open_ambient_dir(root, ambient_authority()).map_err(open_error)?;
        Ok(Self {
            dir,
            root: root.to_path_buf(),
        })
    }

    /// Full path of the session file, for diagnostics.
    #[must_use]
    pub fn file_path(&self) -> Utf8PathBuf {
        self.root.join(SESSION_FILE_NAME)
    }

    /// Read the cached pair. A missing file yields an empty pair.
    ///
    /// # Errors
    ///
    /// Returns [`SessionCacheError::ReadError`] when the file exists but
    /// cannot be read, or [`SessionCacheError::ParseError`] when it does not
    /// hold a cached session.
    pub fn load(&self) -> Result<CachedSession, SessionCacheError> {
        let contents = match self.dir.read_to_string(SESSION_FILE_NAME) {
            Ok(contents) => contents,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Ok(CachedSession::default());
            }
            Err(err) => {
                return Err(SessionCacheError::ReadError {
                    path: self.file_path(),
                    message: err.to_string(),
                });
            }
        };
        serde_json::from_str(&contents).map_err(|err| SessionCacheError::ParseError {
            path: self.file_path(),
            message: err.to_string(),
        })
    }

    /// Replace the cached pair.
    ///
    /// # Errors
    ///
    /// Returns [`SessionCacheError::WriteError`] when the pair cannot be
    /// serialised or the file cannot be replaced.
    pub fn store(&self, session: &CachedSession) -> Result<(), SessionCacheError> {
        let write_error = |err: serde_json::Error| SessionCacheError::WriteError {
            path: self.file_path(),
            message: err.to_string(),
        };
        let contents = serde_json::to_string_pretty(session).map_err(write_error)?;
        write_atomic(&self.dir, SESSION_FILE_NAME, &contents, &self.file_path())
    }

    /// Remove both values. Clearing an empty cache succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`SessionCacheError::ClearError`] when the file exists but
    /// cannot be removed.
    pub fn clear(&self) -> Result<(), SessionCacheError> {
        match self.dir.remove_file(SESSION_FILE_NAME) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(SessionCacheError::ClearError {
                path: self.file_path(),
                message: err.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Unit coverage for the cached pair helpers.

    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(CachedSession::default(), true)]
    #[case(CachedSession { token: Some("t".to_owned()), username: None }, false)]
    #[case(CachedSession { token: None, username: Some("u".to_owned()) }, false)]
    #[case(CachedSession::new("t", "u"), false)]
    fn is_empty_requires_both_values_absent(#[case] session: CachedSession, #[case] empty: bool) {
        assert_eq!(session.is_empty(), empty);
    }

    #[rstest]
    fn debug_output_never_contains_the_token() {
        let session = CachedSession::new("super-secret", "alice");
        let rendered = format!("{session:?}");
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("alice"));
    }

    #[rstest]
    fn partial_files_deserialise() {
        let session: CachedSession =
            serde_json::from_str(r#"{ "username": "alice" }"#).expect("valid json");
        assert_eq!(session.username.as_deref(), Some("alice"));
        assert!(session.token.is_none());
    }
}
