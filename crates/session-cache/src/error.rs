//! Error types for the session-cache crate.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors raised while opening, reading, or mutating the session file.
///
/// Every variant carries the path involved and a rendered message rather than
/// the underlying `io::Error`, so the type stays `Clone` and comparable in
/// tests.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionCacheError {
    /// The cache directory could not be created or opened.
    #[error("failed to open session directory '{path}': {message}")]
    OpenError {
        /// Directory that was requested.
        path: Utf8PathBuf,
        /// Description of the I/O error.
        message: String,
    },

    /// The session file exists but could not be read.
    #[error("failed to read session file at '{path}': {message}")]
    ReadError {
        /// Path to the session file.
        path: Utf8PathBuf,
        /// Description of the I/O error.
        message: String,
    },

    /// The session file is not valid JSON for a cached session.
    #[error("invalid session file at '{path}': {message}")]
    ParseError {
        /// Path to the session file.
        path: Utf8PathBuf,
        /// Description of the parse error.
        message: String,
    },

    /// The session could not be serialised or written.
    #[error("failed to write session file at '{path}': {message}")]
    WriteError {
        /// Path to the session file.
        path: Utf8PathBuf,
        /// Description of the failure.
        message: String,
    },

    /// The session file could not be removed.
    #[error("failed to clear session file at '{path}': {message}")]
    ClearError {
        /// Path to the session file.
        path: Utf8PathBuf,
        /// Description of the I/O error.
        message: String,
    },
}
