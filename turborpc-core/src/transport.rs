//! # Transport
//!
//! The seam between the invoker and the network. A [`Transport`] sends one fully-built
//! `http::Request` and returns the response with its body already read as text.
//!
//! [`HttpTransport`] is the default implementation on top of `reqwest`. Tests can provide
//! their own implementation to observe requests and script responses.
use crate::BoxError;
use std::future::Future;

pub trait Transport: Send + Sync {
    /// Sends `request` and reads the full response body.
    ///
    /// Network failures (connection refused, DNS, timeouts) are returned as `Err`. Any
    /// HTTP status, including error statuses, is a successful exchange.
    fn send(
        &self,
        request: http::Request<String>,
    ) -> impl Future<Output = Result<http::Response<String>, BoxError>> + Send;
}

/// HTTP transport backed by a `reqwest::Client`.
///
/// Relies on the client defaults for timeouts and connection reuse.
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses a preconfigured client (proxies, TLS roots, timeouts...).
    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Transport for HttpTransport {
    async fn send(
        &self,
        request: http::Request<String>,
    ) -> Result<http::Response<String>, BoxError> {
        let request = reqwest::Request::try_from(request)?;
        let response = self.client.execute(request).await?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response.text().await?;

        let mut reply = http::Response::builder().status(status).body(body)?;
        *reply.headers_mut() = headers;
        Ok(reply)
    }
}

impl<T> Transport for &T
where
    T: Transport,
{
    fn send(
        &self,
        request: http::Request<String>,
    ) -> impl Future<Output = Result<http::Response<String>, BoxError>> + Send {
        (**self).send(request)
    }
}
