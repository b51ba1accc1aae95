//! # RPC Invoker
//!
//! This module implements the call logic shared by every TurboRPC service.
//!
//! ## How it works
//!
//! 1. The target URL is the endpoint's base URL with `service=<Service>&method=<Method>`
//!    appended as percent-encoded query pairs.
//! 2. The input is encoded as JSON and sent as the body of a single `POST`, together with
//!    the endpoint's headers.
//! 3. The whole response body is decoded with [`codec::decode`], whatever the status.
//! 4. A `200 OK` yields the `output` field of the body (`None` if it has none).
//!    Any other status yields an [`RpcError`] built from the `message` field.
//!
//! No retries, no caching. Each call is independent of every other call.
mod types;

pub use types::*;

use crate::{
    codec::{self, WireValue},
    error::{CallError, CodecError, RpcError, UNKNOWN_ERROR_MESSAGE},
    transport::{HttpTransport, Transport},
};
use http::{HeaderName, HeaderValue, Method, StatusCode, header::CONTENT_TYPE};
use serde::{Serialize, de::DeserializeOwned};
use std::str::FromStr;
use url::Url;

/// The client for performing TurboRPC calls.
///
/// The generic parameter `T` is the transport used to reach the server.
#[derive(Debug, Clone, Default)]
pub struct RpcClient<T = HttpTransport> {
    transport: T,
}

impl RpcClient<HttpTransport> {
    /// Creates a client using the default HTTP transport.
    pub fn new() -> Self {
        Self::with_transport(HttpTransport::new())
    }
}

impl<T> RpcClient<T>
where
    T: Transport,
{
    pub fn with_transport(transport: T) -> Self {
        Self { transport }
    }

    /// Calls `service.method` with `input`.
    ///
    /// # Returns
    ///
    /// * `Ok(Ok(Some(output)))` - The server answered `200` with an `output` field.
    /// * `Ok(Ok(None))` - The server answered `200` without an `output` field.
    /// * `Ok(Err(RpcError))` - The server answered with any other status.
    /// * `Err(CallError)` - The call could not be sent, or the body was not valid JSON.
    pub async fn call<I>(
        &self,
        endpoint: &Endpoint,
        service: &str,
        method: &str,
        input: &I,
    ) -> Result<Result<Option<WireValue>, RpcError>, CallError>
    where
        I: Serialize + ?Sized,
    {
        let request = CallRequest {
            target: CallTarget::new(service, method),
            input: serde_json::to_value(input).map_err(CodecError::Encode)?,
            headers: endpoint.headers().to_vec(),
        };

        self.send(endpoint.url(), request).await
    }

    /// Same as [`RpcClient::call`], deserializing the output into `O`.
    ///
    /// A missing `output` is read as `null`, so `()` and `Option<_>` outputs accept it.
    pub async fn call_typed<I, O>(
        &self,
        endpoint: &Endpoint,
        target: CallTarget,
        input: &I,
    ) -> Result<Result<O, RpcError>, CallError>
    where
        I: Serialize + ?Sized,
        O: DeserializeOwned,
    {
        let output = match self
            .call(endpoint, &target.service, &target.method, input)
            .await?
        {
            Ok(output) => output,
            Err(rpc_error) => return Ok(Err(rpc_error)),
        };

        let json = output.map(WireValue::into_json).unwrap_or_default();

        serde_json::from_value(json)
            .map(Ok)
            .map_err(|source| CallError::UnexpectedOutput {
                service: target.service,
                method: target.method,
                source,
            })
    }

    /// Performs the HTTP exchange for `request` against `base_url`.
    pub async fn send(
        &self,
        base_url: &Url,
        request: CallRequest,
    ) -> Result<Result<Option<WireValue>, RpcError>, CallError> {
        let response = self.exchange(base_url, &request).await?;
        let CallTarget { service, method } = request.target;

        Ok(classify(response, service, method))
    }

    async fn exchange(
        &self,
        base_url: &Url,
        request: &CallRequest,
    ) -> Result<CallResponse, CallError> {
        let url = target_url(base_url, &request.target);
        let body = codec::encode(&request.input)?;
        let http_request = build_request(&url, body, &request.headers)?;

        tracing::debug!(
            service = %request.target.service,
            method = %request.target.method,
            %url,
            "sending rpc call"
        );

        let response = self
            .transport
            .send(http_request)
            .await
            .map_err(CallError::Transport)?;

        let status = response.status();
        tracing::debug!(
            service = %request.target.service,
            method = %request.target.method,
            %status,
            "received rpc response"
        );

        let body = codec::decode(response.body())?;
        Ok(CallResponse { status, body })
    }
}

fn classify(
    response: CallResponse,
    service: String,
    method: String,
) -> Result<Option<WireValue>, RpcError> {
    let CallResponse { status, mut body } = response;

    if status == StatusCode::OK {
        return Ok(body.take("output"));
    }

    let message = body
        .get("message")
        .and_then(WireValue::as_str)
        .unwrap_or(UNKNOWN_ERROR_MESSAGE);

    tracing::warn!(%service, %method, %status, reason = message, "rpc call failed");

    Err(RpcError::new(message, service, method, status))
}

fn target_url(base_url: &Url, target: &CallTarget) -> Url {
    let mut url = base_url.clone();
    url.query_pairs_mut()
        .append_pair("service", &target.service)
        .append_pair("method", &target.method);
    url
}

fn build_request(
    url: &Url,
    body: String,
    headers: &[(String, String)],
) -> Result<http::Request<String>, CallError> {
    let mut request = http::Request::builder()
        .method(Method::POST)
        .uri(url.as_str())
        .header(CONTENT_TYPE, "application/json")
        .body(body)
        .map_err(CallError::InvalidRequest)?;

    for (k, v) in headers {
        let key = HeaderName::from_str(k).map_err(|source| CallError::InvalidHeaderName {
            key: k.clone(),
            source,
        })?;
        let val = HeaderValue::from_str(v).map_err(|source| CallError::InvalidHeaderValue {
            key: k.clone(),
            source,
        })?;
        request.headers_mut().append(key, val);
    }

    Ok(request)
}
