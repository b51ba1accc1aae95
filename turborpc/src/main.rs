//! # TurboRPC CLI Entry Point
//!
//! The main executable for the TurboRPC command-line client. This file drives the application lifecycle:
//!
//! 1. **Initialization**: Parses command-line arguments using [`cli::Cli`] and installs the logger
//!    (`TURBORPC_LOG`, default `info`).
//! 2. **Execution**: Performs the call through `turborpc_core::RpcClient`.
//! 3. **Presentation**: Prints the decoded output to standard output, or the failure to standard error.
//!
//! Exit codes: `0` on success, `1` when the call could not be completed, `2` when the server
//! reported an RPC error.

mod cli;
mod formatter;

use clap::Parser;
use cli::{Cli, Commands};
use formatter::{CallOutput, FormattedString};
use std::process;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use turborpc_core::{CallError, Endpoint, RpcClient};

#[tokio::main]
async fn main() {
    init_log();

    let args = Cli::parse();

    match args.command {
        Commands::Call {
            endpoint,
            body,
            headers,
        } => {
            let (service, method) = endpoint;
            run_call(&args.url, &service, &method, body, headers).await;
        }
    }
}

fn init_log() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("TURBORPC_LOG")
                .from_env_lossy(),
        )
        .init();
}

fn exit_with(err: CallError) -> ! {
    eprintln!("{}", FormattedString::from(err));
    process::exit(1);
}

async fn run_call(
    url: &str,
    service: &str,
    method: &str,
    body: serde_json::Value,
    headers: Vec<(String, String)>,
) {
    let endpoint = match Endpoint::parse(url) {
        Ok(endpoint) => headers
            .into_iter()
            .fold(endpoint, |endpoint, (k, v)| endpoint.with_header(k, v)),
        Err(err) => exit_with(err),
    };

    let client = RpcClient::new();

    match client.call(&endpoint, service, method, &body).await {
        Ok(Ok(output)) => println!("{}", FormattedString::from(CallOutput(output))),
        Ok(Err(rpc_error)) => {
            eprintln!("{}", FormattedString::from(rpc_error));
            process::exit(2);
        }
        Err(err) => exit_with(err),
    }
}
