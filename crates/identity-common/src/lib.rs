//! # identity-common
//!
//! Shared types for forwarding a caller's bearer token to an identity API.
//!
//! This crate holds everything that does not touch the network:
//! - [`ClientConfig`], describing the target URL and the token source
//! - [`CookieSource`], the read-only view of an inbound request
//! - [`normalize_bearer_prefix`], for tokens that may lack their scheme
//!
//! ## Example
//!
//! ```
//! use identity_common::{ClientConfig, CookieSource, normalize_bearer_prefix};
//!
//! let inbound = http::Request::builder()
//!     .header("cookie", "token=abc123")
//!     .body(())
//!     .unwrap();
//!
//! let config = ClientConfig::new("http://127.0.0.1:5000/users").with_cookie_name("token");
//! let name = config.cookie_name().unwrap();
//! assert_eq!(inbound.cookie(name).as_deref(), Some("abc123"));
//!
//! // A token lifted from an inbound `Authorization` header can be preset as-is.
//! let preset = ClientConfig::new("http://127.0.0.1:5000/users")
//!     .with_preset_token(normalize_bearer_prefix("abc123"));
//! assert!(preset.preset_token().is_some());
//! ```

/// Client configuration.
pub mod config;
/// Inbound cookie lookup.
pub mod cookie;
/// Bearer token helpers.
pub mod token;

pub use config::ClientConfig;
pub use cookie::CookieSource;
pub use token::{BEARER_PREFIX, bearer, normalize_bearer_prefix};
