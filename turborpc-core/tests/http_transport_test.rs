use axum::{
    Json, Router,
    extract::Query,
    http::{HeaderMap, StatusCode},
    routing::post,
};
use serde_json::{Value, json};
use std::collections::HashMap;
use tokio::net::TcpListener;
use turborpc_core::{CallError, Endpoint, RpcClient, WireValue};

/// Echoes the query, the `authorization` header and the body back as the output,
/// unless the method is `Fail`.
async fn handler(
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
    body: String,
) -> (StatusCode, Json<Value>) {
    if query.get("method").map(String::as_str) == Some("Fail") {
        return (
            StatusCode::IM_A_TEAPOT,
            Json(json!({ "message": "short and stout" })),
        );
    }

    let authorization = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    (
        StatusCode::OK,
        Json(json!({
            "output": {
                "query": query,
                "authorization": authorization,
                "body": body,
            }
        })),
    )
}

async fn spawn_server() -> String {
    let app = Router::new().route("/rpc", post(handler));
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{addr}/rpc")
}

#[tokio::test]
async fn test_post_over_http() {
    let url = spawn_server().await;
    let client = RpcClient::new();
    let endpoint = Endpoint::parse(&url)
        .unwrap()
        .with_header("Authorization", "turborpc");

    let output = client
        .call(&endpoint, "Todo", "Add", "buy milk & eggs")
        .await
        .unwrap()
        .unwrap()
        .map(WireValue::into_json)
        .unwrap();

    assert_eq!(output["query"], json!({ "service": "Todo", "method": "Add" }));
    assert_eq!(output["authorization"], "turborpc");
    assert_eq!(output["body"], r#""buy milk & eggs""#);
}

#[tokio::test]
async fn test_error_status_over_http() {
    let url = spawn_server().await;
    let client = RpcClient::new();
    let endpoint = Endpoint::parse(&url).unwrap();

    let err = client
        .call(&endpoint, "Kettle", "Fail", &())
        .await
        .unwrap()
        .unwrap_err();

    assert_eq!(err.status, StatusCode::IM_A_TEAPOT);
    assert_eq!(err.message, "short and stout");
    assert_eq!(err.service, "Kettle");
}

#[tokio::test]
async fn test_connection_refused_is_a_transport_error() {
    // Bind then drop to get a port nobody listens on.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = RpcClient::new();
    let endpoint = Endpoint::parse(&format!("http://{addr}/rpc")).unwrap();

    let err = client
        .call(&endpoint, "Todo", "All", &())
        .await
        .unwrap_err();

    assert!(matches!(err, CallError::Transport(_)));
}
