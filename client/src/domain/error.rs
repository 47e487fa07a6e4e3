//! Domain-level error types.
//!
//! Every service operation returns these. The command-line adapter picks the
//! wording shown to the user from the [`ErrorCode`].

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::ports::ApiError;

/// Stable machine-readable error code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// Signup rejected because the username is already registered.
    UsernameTaken,
    /// Login rejected because username and password do not match.
    InvalidCredentials,
    /// The operation needs a signed-in user with a credential.
    NotAuthenticated,
    /// The story is not among the signed-in user's own stories.
    NotOwner,
    /// The remote API rejected the credential.
    Unauthorized,
    /// The remote API does not know the requested resource.
    NotFound,
    /// The remote API refused the request for another reason.
    Rejected,
    /// No response was received from the remote API.
    Unavailable,
    /// The request could not be built or the response could not be read.
    Internal,
}

/// Domain error payload.
///
/// # Examples
/// ```
/// use hack_or_snooze::domain::{Error, ErrorCode};
///
/// let err = Error::not_owner("story s-1 belongs to someone else");
/// assert_eq!(err.code(), ErrorCode::NotOwner);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Error {
    code: ErrorCode,
    message: String,
}

impl Error {
    /// Create an error with an explicit code.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Stable machine-readable error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Diagnostic message.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Convenience constructor for [`ErrorCode::UsernameTaken`].
    pub fn username_taken(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::UsernameTaken, message)
    }

    /// Convenience constructor for [`ErrorCode::InvalidCredentials`].
    pub fn invalid_credentials(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidCredentials, message)
    }

    /// Convenience constructor for [`ErrorCode::NotAuthenticated`].
    pub fn not_authenticated(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotAuthenticated, message)
    }

    /// Convenience constructor for [`ErrorCode::NotOwner`].
    pub fn not_owner(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotOwner, message)
    }

    /// Convenience constructor for [`ErrorCode::Unauthorized`].
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unauthorized, message)
    }

    /// Convenience constructor for [`ErrorCode::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Convenience constructor for [`ErrorCode::Rejected`].
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Rejected, message)
    }

    /// Convenience constructor for [`ErrorCode::Unavailable`].
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unavailable, message)
    }

    /// Convenience constructor for [`ErrorCode::Internal`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Internal, message)
    }
}

impl Error {
    /// Convert a port failure, recording which operation hit it.
    pub(crate) fn from_port(operation: &'static str, err: ApiError) -> Self {
        debug!(operation, status = ?err.status(), error = %err, "remote call failed");
        Self::from(err)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.code, self.message)
    }
}

impl std::error::Error for Error {}

impl From<ApiError> for Error {
    fn from(err: ApiError) -> Self {
        let message = err.to_string();
        match err {
            ApiError::Conflict { .. } | ApiError::Rejected { .. } => Self::rejected(message),
            ApiError::Unauthorized { .. } => Self::unauthorized(message),
            ApiError::NotFound { .. } => Self::not_found(message),
            ApiError::Transport { .. } | ApiError::Timeout { .. } => Self::unavailable(message),
            ApiError::Decode { .. } | ApiError::InvalidRequest { .. } => Self::internal(message),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(ApiError::conflict("taken"), ErrorCode::Rejected)]
    #[case(ApiError::rejected(400_u16, "bad"), ErrorCode::Rejected)]
    #[case(ApiError::unauthorized("nope"), ErrorCode::Unauthorized)]
    #[case(ApiError::not_found("gone"), ErrorCode::NotFound)]
    #[case(ApiError::transport("refused"), ErrorCode::Unavailable)]
    #[case(ApiError::timeout("slow"), ErrorCode::Unavailable)]
    #[case(ApiError::decode("garbled"), ErrorCode::Internal)]
    #[case(ApiError::invalid_request("bad url"), ErrorCode::Internal)]
    fn api_errors_map_to_codes(#[case] err: ApiError, #[case] expected: ErrorCode) {
        let mapped = Error::from(err.clone());
        assert_eq!(mapped.code(), expected);
        assert_eq!(mapped.message(), err.to_string());
    }

    #[rstest]
    fn display_includes_code_and_message() {
        let err = Error::not_owner("story s-1");
        assert_eq!(err.to_string(), "NotOwner: story s-1");
    }

    #[rstest]
    fn codes_serialise_in_snake_case() {
        let json = serde_json::to_string(&ErrorCode::UsernameTaken).expect("serialise code");
        assert_eq!(json, "\"username_taken\"");
    }
}
