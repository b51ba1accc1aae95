//! # Todo Server
//!
//! Serves the `Todo` service on `TODO_SERVER_ADDR` (default `127.0.0.1:5000`) under `/rpc`.
//! Log verbosity is controlled with `TODO_LOG` (default `info`).
use std::error::Error;
use todo_service::server::{TodoStore, router};
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_ADDR: &str = "127.0.0.1:5000";

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    init_log();

    let addr = std::env::var("TODO_SERVER_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!(addr = %listener.local_addr()?, "todo server listening");

    axum::serve(listener, router(TodoStore::new())).await?;
    Ok(())
}

fn init_log() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("TODO_LOG")
                .from_env_lossy(),
        )
        .init();
}
