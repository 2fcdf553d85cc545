//! Error types for the client library.

use reqwest::StatusCode;
use thiserror::Error;

/// Boxed error returned by [`Transport`](crate::Transport) implementations.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that can occur while forwarding a token to the identity API.
///
/// Every variant is terminal for the call that produced it; no partial
/// response value is ever returned alongside an error.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ClientError {
    /// The configured cookie is not present on the inbound request.
    ///
    /// Raised before any outbound request is made.
    #[error("named cookie not present: {0}")]
    CookieNotFound(String),

    /// The configured target URL cannot be parsed.
    #[error("Invalid URL '{url}': {source}")]
    InvalidUrl {
        /// The URL as configured.
        url: String,
        /// The parser's reason.
        #[source]
        source: url::ParseError,
    },

    /// The resolved token is not a legal header value.
    #[error("Authorization value contains characters not allowed in a header")]
    InvalidToken,

    /// The POST body could not be encoded as JSON.
    #[error("Encode error: {0}")]
    Encode(#[source] serde_json::Error),

    /// The transport failed to deliver the request or receive a response.
    ///
    /// Covers DNS resolution, connection and socket failures.
    #[error("Network error: {0}")]
    Transport(#[source] BoxError),

    /// The identity API answered with a failure status (400 or above).
    ///
    /// The response body is not read.
    #[error("The request returned a status of {0}")]
    UpstreamStatus(StatusCode),

    /// The response body stream failed before completing.
    #[error("Body read error: {0}")]
    BodyRead(#[source] reqwest::Error),

    /// The response body is not valid JSON.
    #[error("Decode error: {0}")]
    Decode(#[source] serde_json::Error),
}

impl ClientError {
    /// Check if this error came from a missing inbound cookie.
    pub const fn is_cookie_not_found(&self) -> bool {
        matches!(self, Self::CookieNotFound(_))
    }

    /// Check if the identity API rejected the request.
    pub const fn is_upstream_status(&self) -> bool {
        matches!(self, Self::UpstreamStatus(_))
    }

    /// The upstream status code, if this is an upstream status error.
    pub const fn status(&self) -> Option<StatusCode> {
        match self {
            Self::UpstreamStatus(status) => Some(*status),
            _ => None,
        }
    }
}
