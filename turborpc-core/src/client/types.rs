use crate::{codec::WireValue, error::CallError};
use http::StatusCode;
use url::Url;

/// Identifies one remote operation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CallTarget {
    /// The service name (e.g. `Todo`).
    pub service: String,
    /// The method name within the service (e.g. `Add`).
    pub method: String,
}

impl CallTarget {
    pub fn new(service: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            method: method.into(),
        }
    }
}

/// A request object encapsulating everything needed to perform one call.
#[derive(Debug, Clone)]
pub struct CallRequest {
    pub target: CallTarget,
    /// The single input argument of the method. `null` when the method takes none.
    pub input: serde_json::Value,
    /// Headers to attach to the HTTP request.
    pub headers: Vec<(String, String)>,
}

/// The HTTP status and decoded body of a completed exchange.
#[derive(Debug, Clone, PartialEq)]
pub struct CallResponse {
    pub status: StatusCode,
    pub body: WireValue,
}

/// Caller-owned configuration passed to every call: where to send it and which headers
/// to attach.
///
/// Wrappers never hold headers themselves, so updating credentials between calls is a
/// matter of changing the `Endpoint` you pass next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    url: Url,
    headers: Vec<(String, String)>,
}

impl Endpoint {
    pub fn new(url: Url) -> Self {
        Self {
            url,
            headers: Vec::new(),
        }
    }

    /// Parses the base URL of the RPC handler (e.g. `http://localhost:5000/rpc`).
    pub fn parse(url: &str) -> Result<Self, CallError> {
        let parsed = Url::parse(url).map_err(|source| CallError::InvalidUrl {
            url: url.to_string(),
            source,
        })?;
        Ok(Self::new(parsed))
    }

    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_header(key, value);
        self
    }

    /// Sets a header, replacing any previous value for the same (case-insensitive) key.
    pub fn set_header(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        self.remove_header(&key);
        self.headers.push((key, value.into()));
    }

    pub fn remove_header(&mut self, key: &str) {
        self.headers.retain(|(k, _)| !k.eq_ignore_ascii_case(key));
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_header_replaces_case_insensitively() {
        let mut endpoint = Endpoint::parse("http://localhost:5000/rpc")
            .unwrap()
            .with_header("Authorization", "wrong");

        endpoint.set_header("authorization", "turborpc");

        assert_eq!(
            endpoint.headers(),
            &[("authorization".to_string(), "turborpc".to_string())]
        );
    }

    #[test]
    fn rejects_relative_urls() {
        let err = Endpoint::parse("/rpc").unwrap_err();

        assert!(matches!(err, CallError::InvalidUrl { url, .. } if url == "/rpc"));
    }
}
