//! Client configuration loaded via OrthoConfig.
//!
//! Values come from `HACK_OR_SNOOZE_*` environment variables (and any
//! configuration file OrthoConfig discovers); global command-line flags are
//! applied on top with [`ClientSettings::with_overrides`].

use std::env;
use std::ffi::{OsStr, OsString};
use std::path::PathBuf;
use std::time::Duration;

use camino::Utf8PathBuf;
use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

use crate::outbound::http::DEFAULT_BASE_URL;

const APP_DIR_NAME: &str = "hack-or-snooze";
const FALLBACK_SESSION_DIR: &str = ".hack-or-snooze";

/// Errors raised while resolving configuration values.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// OrthoConfig could not assemble the settings.
    #[error("failed to load configuration: {message}")]
    Load {
        /// Loader diagnostic.
        message: String,
    },
    /// The configured base URL does not parse.
    #[error("invalid base url {value:?}: {message}")]
    InvalidBaseUrl {
        /// Raw configured value.
        value: String,
        /// Parser diagnostic.
        message: String,
    },
    /// The session directory is not valid UTF-8.
    #[error("session directory {path:?} is not valid UTF-8")]
    NonUtf8Path {
        /// Offending path.
        path: PathBuf,
    },
}

/// Settings controlling where the client talks to and where it keeps state.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "HACK_OR_SNOOZE")]
pub struct ClientSettings {
    /// Root URL of the remote API.
    pub base_url: Option<String>,
    /// Per-request timeout in seconds; transport default when unset or zero.
    pub timeout_seconds: Option<u64>,
    /// Directory holding the session cache file.
    pub session_dir: Option<PathBuf>,
    /// Emit logs as JSON lines.
    #[ortho_config(default = false)]
    pub log_json: bool,
}

impl ClientSettings {
    /// Load settings from the environment and configuration files.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Load`] when a value is present but malformed.
    pub fn load_from_env() -> Result<Self, ConfigError> {
        Self::load_from_iter([OsString::from(APP_DIR_NAME)]).map_err(|err| ConfigError::Load {
            message: err.to_string(),
        })
    }

    /// Apply command-line overrides; `None` keeps the loaded value.
    #[must_use]
    pub fn with_overrides(
        mut self,
        base_url: Option<String>,
        session_dir: Option<PathBuf>,
    ) -> Self {
        if base_url.is_some() {
            self.base_url = base_url;
        }
        if session_dir.is_some() {
            self.session_dir = session_dir;
        }
        self
    }

    /// Parsed base URL, falling back to the public deployment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] when the value does not parse.
    pub fn base_url(&self) -> Result<Url, ConfigError> {
        let raw = self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL);
        Url::parse(raw).map_err(|err| ConfigError::InvalidBaseUrl {
            value: raw.to_owned(),
            message: err.to_string(),
        })
    }

    /// Configured request timeout.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_seconds
            .filter(|seconds| *seconds > 0)
            .map(Duration::from_secs)
    }

    /// Session directory, falling back to the per-user config directory.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NonUtf8Path`] when the path is not UTF-8.
    pub fn session_dir(&self) -> Result<Utf8PathBuf, ConfigError> {
        let path = self.session_dir.clone().unwrap_or_else(|| {
            default_session_dir(
                env::var_os("XDG_CONFIG_HOME").as_deref(),
                env::var_os("HOME").as_deref(),
            )
        });
        Utf8PathBuf::from_path_buf(path).map_err(|path| ConfigError::NonUtf8Path { path })
    }
}

fn default_session_dir(xdg_config_home: Option<&OsStr>, home: Option<&OsStr>) -> PathBuf {
    let non_empty = |value: Option<&OsStr>| value.filter(|v| !v.is_empty()).map(PathBuf::from);
    if let Some(config_home) = non_empty(xdg_config_home) {
        config_home.join(APP_DIR_NAME)
    } else if let Some(home) = non_empty(home) {
        home.join(".config").join(APP_DIR_NAME)
    } else {
        PathBuf::from(FALLBACK_SESSION_DIR)
    }
}
