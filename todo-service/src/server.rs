//! # Todo Server
//!
//! An `axum` router speaking the TurboRPC wire format:
//!
//! * `POST /rpc?service=Todo&method=<Method>` with the JSON input as body.
//! * `200 {"output": ...}` on success, `<status> {"message": "..."}` on failure.
//!
//! Every request must carry `Authorization: turborpc`.
use crate::{AUTH_TOKEN, TodoItem};
use axum::{
    Router,
    extract::{Query, State},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use chrono::Utc;
use serde::{Serialize, de::DeserializeOwned};
use std::{
    collections::HashMap,
    sync::{Arc, Mutex, PoisonError},
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use turborpc_core::codec;

/// Shared, in-memory list of items.
#[derive(Debug, Clone, Default)]
pub struct TodoStore {
    items: Arc<Mutex<Vec<TodoItem>>>,
}

impl TodoStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_items<R>(&self, f: impl FnOnce(&mut Vec<TodoItem>) -> R) -> R {
        let mut items = self.items.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut items)
    }

    pub fn add(&self, content: String) {
        self.with_items(|items| {
            items.insert(
                0,
                TodoItem {
                    content,
                    created: Utc::now(),
                    finished: None,
                },
            )
        });
    }

    pub fn all(&self) -> Vec<TodoItem> {
        self.with_items(|items| items.clone())
    }

    /// Flips the finished state of the item at `index`. `None` if out of range.
    pub fn toggle(&self, index: i64) -> Option<TodoItem> {
        self.with_items(|items| {
            let index = usize::try_from(index).ok()?;
            let item = items.get_mut(index)?;

            item.finished = match item.finished {
                Some(_) => None,
                None => Some(Utc::now()),
            };

            Some(item.clone())
        })
    }
}

#[derive(Serialize)]
struct Success<T> {
    output: T,
}

#[derive(Serialize)]
struct Failure<'a> {
    message: &'a str,
}

/// Builds the router serving the `Todo` service under `/rpc`.
///
/// Requests from any origin are allowed and every request is logged at `INFO`.
pub fn router(store: TodoStore) -> Router {
    Router::new()
        .route("/rpc", post(handle))
        .with_state(store)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(CorsLayer::permissive())
}

async fn handle(
    State(store): State<TodoStore>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
    body: String,
) -> Response {
    let authorized = headers
        .get(header::AUTHORIZATION)
        .is_some_and(|value| value == AUTH_TOKEN);

    if !authorized {
        return failure(StatusCode::UNAUTHORIZED, "unauthorized");
    }

    let (Some(service), Some(method)) = (query.get("service"), query.get("method")) else {
        return failure(StatusCode::BAD_REQUEST, "missing service or method");
    };

    tracing::info!(%service, %method, "handling rpc call");

    if service != "Todo" {
        return failure(StatusCode::NOT_FOUND, "unknown service");
    }

    match method.as_str() {
        "Add" => match input::<String>(&body) {
            Some(content) => {
                store.add(content);
                success(())
            }
            None => failure(StatusCode::BAD_REQUEST, "invalid input"),
        },
        "All" => success(store.all()),
        "Toggle" => match input::<i64>(&body) {
            Some(index) => match store.toggle(index) {
                Some(item) => success(item),
                None => failure(StatusCode::BAD_REQUEST, "invalid index"),
            },
            None => failure(StatusCode::BAD_REQUEST, "invalid input"),
        },
        _ => failure(StatusCode::NOT_FOUND, "unknown method"),
    }
}

/// Reads the method input as plain JSON. Only fields declared with `codec::date` are dates.
fn input<T: DeserializeOwned>(body: &str) -> Option<T> {
    serde_json::from_str(body).ok()
}

fn success<T: Serialize>(output: T) -> Response {
    reply(StatusCode::OK, &Success { output })
}

fn failure(status: StatusCode, message: &str) -> Response {
    tracing::warn!(%status, reason = message, "rpc call rejected");
    reply(status, &Failure { message })
}

fn reply<T: Serialize>(status: StatusCode, body: &T) -> Response {
    match codec::encode(body) {
        Ok(text) => (status, [(header::CONTENT_TYPE, "application/json")], text).into_response(),
        Err(err) => {
            tracing::error!(%err, "failed to encode rpc reply");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_prepends_items() {
        let store = TodoStore::new();

        store.add("first".to_string());
        store.add("second".to_string());

        let contents: Vec<_> = store.all().into_iter().map(|item| item.content).collect();
        assert_eq!(contents, ["second", "first"]);
    }

    #[test]
    fn toggle_flips_finished_and_rejects_bad_indexes() {
        let store = TodoStore::new();
        store.add("only".to_string());

        assert!(store.toggle(0).unwrap().finished.is_some());
        assert!(store.toggle(0).unwrap().finished.is_none());
        assert_eq!(store.toggle(1), None);
        assert_eq!(store.toggle(-1), None);
    }

    #[test]
    fn input_keeps_tag_shaped_strings_verbatim() {
        let content: String = input(r#""__turborpc.Date(2024-01-01)""#).unwrap();

        assert_eq!(content, "__turborpc.Date(2024-01-01)");
        assert_eq!(input::<i64>("\"zero\""), None);
    }

    #[test]
    fn replies_use_tagged_dates() {
        let store = TodoStore::new();
        store.add("dated".to_string());

        let text = codec::encode(&Success {
            output: store.all(),
        })
        .unwrap();

        assert!(text.contains(r#""Created":"__turborpc.Date("#));
        assert!(text.contains(r#""Finished":null"#));
    }
}
