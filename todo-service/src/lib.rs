//! # Todo Service
//!
//! **INTERNAL USE ONLY**: This crate provides a small TurboRPC service, its typed client and
//! an HTTP server implementation, used to exercise `turborpc-core` end to end.
//! It is not intended for production use.
pub mod server;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use turborpc_core::{
    RpcClient,
    codec::date,
    service,
    transport::{HttpTransport, Transport},
};

/// Value of the `Authorization` header the server accepts.
pub const AUTH_TOKEN: &str = "turborpc";

/// One entry of the to-do list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TodoItem {
    #[serde(rename = "Content")]
    pub content: String,
    #[serde(rename = "Created", with = "date")]
    pub created: DateTime<Utc>,
    #[serde(rename = "Finished", with = "date::option")]
    pub finished: Option<DateTime<Utc>>,
}

service! {
    /// Typed client for the `Todo` service.
    pub struct Todo = "Todo" {
        /// Prepends a new item with the given content.
        fn add(String) -> () = "Add";
        /// Returns every item, most recent first.
        fn all() -> Vec<TodoItem> = "All";
        /// Marks the item at `index` as finished, or unfinished if it already was.
        fn toggle(i64) -> TodoItem = "Toggle";
    }
}

/// Every service wrapper the server exposes, sharing one client.
#[derive(Debug, Clone)]
pub struct Rpc<T = HttpTransport> {
    pub todo: Todo<T>,
}

impl Rpc<HttpTransport> {
    pub fn new() -> Self {
        Self::from_client(RpcClient::new())
    }
}

impl Default for Rpc<HttpTransport> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Rpc<T>
where
    T: Transport,
{
    pub fn from_client(client: RpcClient<T>) -> Self {
        Self {
            todo: Todo::from_client(client),
        }
    }
}
