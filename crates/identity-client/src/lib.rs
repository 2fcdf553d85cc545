//! # identity-client
//!
//! Forwards the bearer token of an inbound request to a downstream identity
//! API and returns the JSON reply as an untyped [`serde_json::Value`].
//!
//! The token comes from one of two places, configured on
//! [`ClientConfig`](identity_common::ClientConfig):
//! - a preset `Authorization` value, sent verbatim
//! - a named cookie on the inbound request, sent as `Bearer <value>`
//!
//! Requests go out through a [`Transport`], which defaults to a plain
//! `reqwest::Client` and can be swapped for a shared client, a middleware
//! stack, or a test stub.
//!
//! ## Example
//!
//! ```no_run
//! use identity_client::{IdentityClient, JsonBody};
//! use identity_common::{ClientConfig, normalize_bearer_prefix};
//!
//! # async fn example(inbound: http::request::Parts) -> Result<(), identity_client::ClientError> {
//! // Forward the caller's `token` cookie.
//! let users = IdentityClient::new(
//!     ClientConfig::new("http://127.0.0.1:5000/users").with_cookie_name("token"),
//! );
//! let me = users.get(&inbound).await?;
//! println!("{}", me["email"]);
//!
//! // Or forward a token taken from somewhere else.
//! let raw = inbound
//!     .headers
//!     .get("authorization")
//!     .and_then(|v| v.to_str().ok())
//!     .unwrap_or_default();
//! let search = IdentityClient::new(
//!     ClientConfig::new("http://127.0.0.1:5000/users/search")
//!         .with_preset_token(normalize_bearer_prefix(raw)),
//! );
//! let mut body = JsonBody::new();
//! body.insert("name".into(), "John".into());
//! let found = search.post(&inbound, &body).await?;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
pub mod transport;

pub use client::{FetchRequest, IdentityClient, JsonBody};
pub use error::{BoxError, ClientError};
pub use transport::Transport;
