//! Failures reported by the remote API ports.

use super::define_port_error;

define_port_error! {
    /// Errors surfaced while calling the remote story and user endpoints.
    pub enum ApiError {
        /// The server answered 409; the resource already exists.
        Conflict { message: String } =>
            "remote conflict: {message}",
        /// The server answered 401; the credential was refused.
        Unauthorized { message: String } =>
            "remote refused credentials: {message}",
        /// The server answered 404.
        NotFound { message: String } =>
            "remote resource not found: {message}",
        /// The server answered with any other non-success status.
        Rejected { status: u16, message: String } =>
            "remote rejected request with status {status}: {message}",
        /// The request was sent but no response arrived.
        Transport { message: String } =>
            "remote transport failed: {message}",
        /// The request exceeded the configured timeout.
        Timeout { message: String } =>
            "remote call timed out: {message}",
        /// The response arrived but could not be decoded.
        Decode { message: String } =>
            "remote response decode failed: {message}",
        /// The request could not be built, so it was never sent.
        InvalidRequest { message: String } =>
            "remote request invalid: {message}",
    }
}

impl ApiError {
    /// HTTP status carried by server-side rejections.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Conflict { .. } => Some(409),
            Self::Unauthorized { .. } => Some(401),
            Self::NotFound { .. } => Some(404),
            Self::Rejected { status, .. } => Some(*status),
            Self::Transport { .. }
            | Self::Timeout { .. }
            | Self::Decode { .. }
            | Self::InvalidRequest { .. } => None,
        }
    }
}
