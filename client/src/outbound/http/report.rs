//! Single reporting path for failed remote calls.
//!
//! Every failure the adapter sees passes through [`report`] exactly once
//! before it is mapped to a port error. Reporting only logs; it cannot fail.
//! Request paths are logged without their query string, so the credential
//! sent to `GET /users/{username}` never reaches the log.

use reqwest::header::HeaderMap;
use reqwest::{Method, StatusCode, Url};
use tracing::{error, warn};

const PREVIEW_CHAR_LIMIT: usize = 240;
const REDACTED_HEADERS: [&str; 3] = ["authorization", "cookie", "set-cookie"];

/// Method and path of an outbound request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestSummary {
    /// HTTP method.
    pub method: Method,
    /// URL path without query or fragment.
    pub path: String,
}

impl RequestSummary {
    /// Summarise a request, dropping the query string.
    pub fn new(method: Method, url: &Url) -> Self {
        Self {
            method,
            path: url.path().to_owned(),
        }
    }
}

/// What went wrong with one remote call.
#[derive(Debug)]
pub enum Failure<'a> {
    /// The server answered with a non-success status.
    Response {
        /// Request that was sent.
        request: &'a RequestSummary,
        /// Status returned.
        status: StatusCode,
        /// Response headers.
        headers: &'a HeaderMap,
        /// Raw response body.
        body: &'a [u8],
    },
    /// The request went out but no response arrived.
    NoResponse {
        /// Request that was sent.
        request: &'a RequestSummary,
        /// Transport error description.
        error: &'a str,
    },
    /// The request could not be built.
    Unsent {
        /// What prevented sending.
        message: &'a str,
    },
    /// A success response arrived but its body was unusable.
    Undecodable {
        /// Request that was sent.
        request: &'a RequestSummary,
        /// Decoder error description.
        message: &'a str,
    },
}

/// Log diagnostic detail for one failure.
pub fn report(failure: &Failure<'_>) {
    match failure {
        Failure::Response {
            request,
            status,
            headers,
            body,
        } => warn!(
            method = %request.method,
            path = %request.path,
            status = status.as_u16(),
            headers = %header_summary(headers),
            body = %body_preview(body),
            "remote API rejected request"
        ),
        Failure::NoResponse { request, error } => error!(
            method = %request.method,
            path = %request.path,
            error = %error,
            "no response from remote API"
        ),
        Failure::Unsent { message } => {
            error!(detail = %message, "remote request could not be built");
        }
        Failure::Undecodable { request, message } => error!(
            method = %request.method,
            path = %request.path,
            detail = %message,
            "remote response could not be decoded"
        ),
    }
}

/// Collapse whitespace and truncate a body for logs and error messages.
pub(crate) fn body_preview(body: &[u8]) -> String {
    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}

fn header_summary(headers: &HeaderMap) -> String {
    headers
        .iter()
        .map(|(name, value)| {
            let shown = if REDACTED_HEADERS.contains(&name.as_str()) {
                "<redacted>"
            } else {
                value.to_str().unwrap_or("<binary>")
            };
            format!("{name}: {shown}")
        })
        .collect::<Vec<_>>()
        .join(", ")
}
