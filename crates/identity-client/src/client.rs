//! Token-forwarding client implementation.
//!
//! [`IdentityClient`] turns an inbound request into one outbound call against
//! the configured identity API:
//!
//! 1. Resolve the `Authorization` value (preset token, else named cookie).
//! 2. Build a GET, or a POST with a JSON body.
//! 3. Send it through the [`Transport`].
//! 4. Reject any status of 400 or above without reading the body.
//! 5. Decode the body into a [`serde_json::Value`].
//!
//! The decoded value is deliberately untyped; callers narrow it themselves.
//!
//! # Examples
//!
//! ```no_run
//! use identity_client::IdentityClient;
//! use identity_common::ClientConfig;
//!
//! # async fn example(inbound: http::Request<()>) -> Result<(), identity_client::ClientError> {
//! let config = ClientConfig::new("http://127.0.0.1:5000/users").with_cookie_name("token");
//! let client = IdentityClient::new(config);
//!
//! let data = client.get(&inbound).await?;
//! let email = data["email"].as_str();
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use http::header::{AUTHORIZATION, CONTENT_TYPE};
use log::{debug, error, warn};
use reqwest::header::HeaderValue;
use reqwest::{Method, Request};
use secrecy::ExposeSecret;
use serde_json::Value;

use identity_common::{ClientConfig, CookieSource, bearer};

use crate::error::ClientError;
use crate::transport::Transport;

/// JSON object sent as the body of a POST.
pub type JsonBody = serde_json::Map<String, Value>;

/// The shape of one outbound call.
#[derive(Debug, Clone, Copy)]
pub enum FetchRequest<'a> {
    /// A GET with an empty body.
    Get,
    /// A POST carrying a JSON-encoded body.
    Post(&'a JsonBody),
}

impl FetchRequest<'_> {
    fn method(&self) -> Method {
        match self {
            Self::Get => Method::GET,
            Self::Post(_) => Method::POST,
        }
    }
}

/// Client that forwards a caller's bearer token to an identity API.
///
/// The client is cheaply cloneable; clones share the configuration and the
/// transport.
#[derive(Clone)]
pub struct IdentityClient {
    transport: Arc<dyn Transport>,
    config: Arc<ClientConfig>,
}

// The preset token is already redacted by `SecretString`; the transport has no useful Debug.
impl std::fmt::Debug for IdentityClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentityClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl IdentityClient {
    /// Create a client backed by a default `reqwest::Client`.
    #[must_use]
    pub fn new(config: ClientConfig) -> Self {
        Self::with_transport(config, reqwest::Client::new())
    }

    /// Create a client that sends its requests through `transport`.
    ///
    /// Pass an `Arc` to share one transport between several clients.
    #[must_use]
    pub fn with_transport<T: Transport + 'static>(config: ClientConfig, transport: T) -> Self {
        Self {
            transport: Arc::new(transport),
            config: Arc::new(config),
        }
    }

    /// Get the client's configuration.
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Issue a GET to the configured URL, forwarding the inbound token.
    ///
    /// # Errors
    ///
    /// See [`fetch`](Self::fetch).
    pub async fn get<R>(&self, inbound: &R) -> Result<Value, ClientError>
    where
        R: CookieSource + Sync + ?Sized,
    {
        self.fetch(inbound, FetchRequest::Get).await
    }

    /// Issue a POST with a JSON body to the configured URL, forwarding the
    /// inbound token.
    ///
    /// # Errors
    ///
    /// See [`fetch`](Self::fetch).
    pub async fn post<R>(&self, inbound: &R, body: &JsonBody) -> Result<Value, ClientError>
    where
        R: CookieSource + Sync + ?Sized,
    {
        self.fetch(inbound, FetchRequest::Post(body)).await
    }

    /// Issue one request to the configured URL and decode the JSON reply.
    ///
    /// `inbound` is only consulted when a cookie name is configured and no
    /// preset token is.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The configured cookie is missing from `inbound` (no request is sent)
    /// - The target URL or resolved token is malformed
    /// - The transport fails to deliver the request
    /// - The upstream responds with a status of 400 or above
    /// - The response body cannot be read or is not valid JSON
    pub async fn fetch<R>(&self, inbound: &R, call: FetchRequest<'_>) -> Result<Value, ClientError>
    where
        R: CookieSource + Sync + ?Sized,
    {
        let authorization = self.resolve_authorization(inbound)?;
        let request = self.build_request(call, authorization)?;

        debug!("Sending {} {}", request.method(), request.url());

        let response = self
            .transport
            .send(request)
            .await
            .map_err(ClientError::Transport)?;

        let status = response.status();
        if status.as_u16() >= 400 {
            error!("identity api responded with status {status}");
            return Err(ClientError::UpstreamStatus(status));
        }

        let body = response.bytes().await.map_err(ClientError::BodyRead)?;
        serde_json::from_slice(&body).map_err(ClientError::Decode)
    }

    /// Work out the `Authorization` header value for this call, if any.
    ///
    /// A preset token wins outright; the cookie is not looked at in that case.
    fn resolve_authorization<R>(&self, inbound: &R) -> Result<Option<HeaderValue>, ClientError>
    where
        R: CookieSource + ?Sized,
    {
        let token = if let Some(preset) = self.config.preset_token() {
            preset.expose_secret().to_string()
        } else if let Some(name) = self.config.cookie_name() {
            let value = inbound.cookie(name).ok_or_else(|| {
                warn!("Inbound request has no '{name}' cookie");
                ClientError::CookieNotFound(name.to_string())
            })?;
            bearer(&value)
        } else {
            return Ok(None);
        };

        let mut value = HeaderValue::try_from(token).map_err(|_| ClientError::InvalidToken)?;
        value.set_sensitive(true);
        Ok(Some(value))
    }

    fn build_request(
        &self,
        call: FetchRequest<'_>,
        authorization: Option<HeaderValue>,
    ) -> Result<Request, ClientError> {
        let url = self.config.url().map_err(|source| ClientError::InvalidUrl {
            url: self.config.target_url.clone(),
            source,
        })?;

        let mut request = Request::new(call.method(), url);

        if let FetchRequest::Post(body) = call {
            let encoded = serde_json::to_vec(body).map_err(ClientError::Encode)?;
            request
                .headers_mut()
                .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
            *request.body_mut() = Some(encoded.into());
        }

        if let Some(value) = authorization {
            request.headers_mut().insert(AUTHORIZATION, value);
        }

        Ok(request)
    }
}
