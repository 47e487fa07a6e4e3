//! Atomic on-disk cache for a login token and username pair.
//!
//! A client that authenticates against a remote API usually wants to skip the
//! password prompt on the next run. This crate keeps the two values needed to
//! do that, the opaque token and the username it belongs to, in a small JSON
//! file inside a caller-chosen directory. The crate knows nothing about the
//! API that issued the token.
//!
//! Writes go through a temporary file and a rename so a crash never leaves a
//! half-written session behind. Reads tolerate a missing file and report it as
//! an empty pair, mirroring a browser's local storage returning nothing for an
//! unknown key.
//!
//! # Example
//!
//! ```
//! use camino::Utf8PathBuf;
//! use session_cache::{CachedSession, SessionCache};
//!
//! let scratch = std::env::temp_dir().join(format!("session-cache-doc-{}", std::process::id()));
//! let root = Utf8PathBuf::from_path_buf(scratch).expect("utf-8 temp dir");
//! let cache = SessionCache::open(&root).expect("open cache");
//!
//! cache.store(&CachedSession::new("tok", "alice")).expect("store");
//! let loaded = cache.load().expect("load");
//! assert_eq!(loaded.username.as_deref(), Some("alice"));
//!
//! cache.clear().expect("clear");
//! assert!(cache.load().expect("load").is_empty());
//! ```

mod atomic_io;
mod cache;
mod error;

pub use cache::{CachedSession, SESSION_FILE_NAME, SessionCache};
pub use error::SessionCacheError;
