use std::sync::Mutex;
use turborpc_core::{
    BoxError, Transport,
    http::{HeaderMap, Method, Request, Response, Uri},
};

/// What the transport saw for one call.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub uri: Uri,
    pub headers: HeaderMap,
    pub body: String,
}

impl RecordedRequest {
    /// Returns the decoded value of the query parameter `key`.
    pub fn query_param(&self, key: &str) -> Option<String> {
        let url = url::Url::parse(&self.uri.to_string()).ok()?;
        url.query_pairs()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.into_owned())
    }
}

/// A transport that records every request and answers with a scripted response.
pub struct MockTransport {
    reply: Result<(u16, String), String>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl MockTransport {
    pub fn replying(status: u16, body: &str) -> Self {
        Self {
            reply: Ok((status, body.to_string())),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(reason: &str) -> Self {
        Self {
            reply: Err(reason.to_string()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl Transport for MockTransport {
    async fn send(&self, request: Request<String>) -> Result<Response<String>, BoxError> {
        let (parts, body) = request.into_parts();
        self.requests.lock().unwrap().push(RecordedRequest {
            method: parts.method,
            uri: parts.uri,
            headers: parts.headers,
            body,
        });

        match &self.reply {
            Ok((status, body)) => Ok(Response::builder().status(*status).body(body.clone())?),
            Err(reason) => Err(reason.clone().into()),
        }
    }
}
