//! Client configuration.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use url::Url;

/// Configuration for forwarding a bearer token to an identity API.
///
/// A configuration names the endpoint to call and where the forwarded token
/// comes from. It is read-only once built and can be reused for any number of
/// calls.
///
/// Token sources, in order of precedence:
/// 1. `preset_token`, used verbatim as the `Authorization` header value.
/// 2. `cookie_name`, looked up on the inbound request and sent as
///    `Bearer <value>`.
///
/// Empty strings count as unset for both. With neither configured no
/// `Authorization` header is sent.
///
/// The preset token is stored as a [`SecretString`]: it is redacted from
/// `Debug` output and never serialized.
///
/// # Examples
///
/// ```
/// use identity_common::ClientConfig;
///
/// let config = ClientConfig::new("http://127.0.0.1:5000/users")
///     .with_cookie_name("token");
///
/// assert_eq!(config.cookie_name(), Some("token"));
/// assert!(config.preset_token().is_none());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// URL the outbound request is sent to.
    pub target_url: String,
    /// Name of the inbound cookie holding the raw token.
    #[serde(default)]
    pub cookie_name: Option<String>,
    /// Complete `Authorization` header value, including the `Bearer ` prefix.
    #[serde(skip_serializing, default)]
    pub preset_token: Option<SecretString>,
}

impl ClientConfig {
    /// Creates a configuration for `target_url` with no token source.
    pub fn new(target_url: impl Into<String>) -> Self {
        Self {
            target_url: target_url.into(),
            cookie_name: None,
            preset_token: None,
        }
    }

    /// Sets the name of the inbound cookie that carries the token.
    ///
    /// Passing an empty string disables cookie lookup.
    #[must_use]
    pub fn with_cookie_name(mut self, cookie_name: impl Into<String>) -> Self {
        self.cookie_name = Some(cookie_name.into());
        self
    }

    /// Sets a fixed `Authorization` header value.
    ///
    /// The value is sent as-is. Use
    /// [`normalize_bearer_prefix`](crate::normalize_bearer_prefix) if the
    /// token may lack its `Bearer ` prefix.
    #[must_use]
    pub fn with_preset_token(mut self, token: impl Into<String>) -> Self {
        self.preset_token = Some(SecretString::new(token.into().into()));
        self
    }

    /// The configured cookie name, if set and non-empty.
    #[must_use]
    pub fn cookie_name(&self) -> Option<&str> {
        self.cookie_name.as_deref().filter(|name| !name.is_empty())
    }

    /// The preset token, if set and non-empty.
    #[must_use]
    pub fn preset_token(&self) -> Option<&SecretString> {
        self.preset_token
            .as_ref()
            .filter(|token| !token.expose_secret().is_empty())
    }

    /// Parses [`target_url`](Self::target_url).
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is not absolute or otherwise malformed.
    pub fn url(&self) -> Result<Url, url::ParseError> {
        Url::parse(&self.target_url)
    }
}
