//! # TurboRPC Core
//!
//! `turborpc-core` is the foundational library powering the TurboRPC clients. It turns a
//! `(service, method, input)` triple into a single HTTP `POST`, decodes the JSON response
//! (reviving tagged date values on the way) and tells transport failures apart from
//! application-level RPC failures.
//!
//! ## Key Components
//!
//! * **[`RpcClient`]:** The invoker. Builds the request target, sends exactly one request per
//!   call through a [`Transport`] and classifies the response.
//! * **[`Endpoint`]:** The caller-owned configuration (base URL and headers) passed to every call.
//! * **[`codec`]:** JSON encoding and decoding, including the `__turborpc.Date(...)` convention
//!   and the [`WireValue`] tree that carries decoded dates.
//! * **[`service!`]:** Generates thin typed wrappers binding a service name and method names
//!   to the invoker.
//!
//! ## Error model
//!
//! Calls return `Result<Result<T, RpcError>, CallError>`:
//!
//! * The outer [`CallError`] means the call could not be completed locally: invalid URL or
//!   headers, a network failure, or a response body that is not valid JSON.
//! * The inner [`RpcError`] means the server answered with a non-200 status. It carries the
//!   server message, the service, the method and the HTTP status.
//!
//! ```rust,no_run
//! use turborpc_core::{Endpoint, RpcClient};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let client = RpcClient::new();
//! let endpoint = Endpoint::parse("http://localhost:5000/rpc")?
//!     .with_header("Authorization", "turborpc");
//!
//! match client.call(&endpoint, "Todo", "All", &()).await? {
//!     Ok(output) => println!("{output:?}"),
//!     Err(rpc_error) => eprintln!("remote failure: {rpc_error}"),
//! }
//! # Ok(())
//! # }
//! ```
pub mod client;
pub mod codec;
pub mod error;
pub mod service;
pub mod transport;

pub use client::{CallRequest, CallResponse, CallTarget, Endpoint, RpcClient};
pub use codec::WireValue;
pub use error::{CallError, CodecError, RpcError};
pub use transport::{HttpTransport, Transport};

// Re-exports
pub use chrono;
pub use http;
pub use serde_json;

/// Type alias for the standard boxed error used by transports.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;
