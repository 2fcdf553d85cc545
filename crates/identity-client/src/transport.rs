//! Pluggable HTTP transport.
//!
//! [`IdentityClient`](crate::IdentityClient) builds a complete
//! [`reqwest::Request`] and hands it to a [`Transport`] for delivery. Any
//! `reqwest::Client` works as-is, so callers who want connection pooling,
//! timeouts or proxies configure those on their own client. A
//! [`ClientWithMiddleware`] also works, which is where retry policies belong.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Request, Response};
use reqwest_middleware::ClientWithMiddleware;

use crate::error::BoxError;

/// Sends one HTTP request and returns the response or a delivery error.
///
/// Implementations must be safe to share across concurrent calls. A
/// non-success status is still a response, not an error.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Deliver `request` and return the upstream response.
    ///
    /// # Errors
    ///
    /// Returns an error if the request could not be delivered or no response
    /// was received.
    async fn send(&self, request: Request) -> Result<Response, BoxError>;
}

#[async_trait]
impl Transport for reqwest::Client {
    async fn send(&self, request: Request) -> Result<Response, BoxError> {
        Ok(self.execute(request).await?)
    }
}

#[async_trait]
impl Transport for ClientWithMiddleware {
    async fn send(&self, request: Request) -> Result<Response, BoxError> {
        Ok(self.execute(request).await?)
    }
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn send(&self, request: Request) -> Result<Response, BoxError> {
        (**self).send(request).await
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use reqwest::{Method, Url};
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn mount_ok(mock_server: &MockServer) {
        Mock::given(method("GET"))
            .and(path("/users"))
            .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
            .expect(1)
            .mount(mock_server)
            .await;
    }

    fn request_for(mock_server: &MockServer) -> Request {
        let url = Url::parse(&format!("{}/users", mock_server.uri())).unwrap();
        Request::new(Method::GET, url)
    }

    #[tokio::test]
    async fn test_reqwest_client_transport() {
        let mock_server = MockServer::start().await;
        mount_ok(&mock_server).await;

        let transport = reqwest::Client::new();
        let response = transport.send(request_for(&mock_server)).await.unwrap();
        assert_eq!(response.status(), 200);
        assert_eq!(response.text().await.unwrap(), "ok");
    }

    #[tokio::test]
    async fn test_middleware_client_transport() {
        let mock_server = MockServer::start().await;
        mount_ok(&mock_server).await;

        let transport = reqwest_middleware::ClientBuilder::new(reqwest::Client::new()).build();
        let response = transport.send(request_for(&mock_server)).await.unwrap();
        assert_eq!(response.status(), 200);
    }

    #[tokio::test]
    async fn test_shared_transport() {
        let mock_server = MockServer::start().await;
        mount_ok(&mock_server).await;

        let transport: Arc<dyn Transport> = Arc::new(reqwest::Client::new());
        let response = transport.send(request_for(&mock_server)).await.unwrap();
        assert_eq!(response.status(), 200);
    }

    #[tokio::test]
    async fn test_error_status_is_not_a_transport_error() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;

        let response = reqwest::Client::new()
            .send(request_for(&mock_server))
            .await
            .unwrap();
        assert_eq!(response.status(), 500);
    }

    #[tokio::test]
    async fn test_connection_failure_is_an_error() {
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let url = Url::parse(&format!("http://127.0.0.1:{port}/")).unwrap();
        let request = Request::new(Method::GET, url);
        assert!(reqwest::Client::new().send(request).await.is_err());
    }
}
