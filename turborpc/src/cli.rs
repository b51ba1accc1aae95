//! # CLI
//!
//! This module defines the command-line interface of `turborpc` using `clap`.
//!
//! It is responsible for parsing user input and performing validation (e.g., ensuring headers are `key:value`);
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "turborpc", version, about = "TurboRPC command-line client")]
pub struct Cli {
    /// The RPC handler URL (e.g. http://localhost:5000/rpc)
    #[arg(env = "TURBORPC_URL")]
    pub url: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Perform a call against a TurboRPC server
    ///
    /// Sends the JSON body as the single input of the method and prints the decoded output.
    ///
    /// ## Examples:
    ///
    /// ```bash
    /// turborpc http://localhost:5000/rpc call Todo/Add --body '"buy milk"' -H 'Authorization: turborpc'
    /// ```
    Call {
        /// Endpoint (Service/Method)
        #[arg(value_parser = parse_endpoint)]
        endpoint: (String, String),
        /// JSON input of the method
        #[arg(long, value_parser = parse_body, default_value = "null")]
        body: serde_json::Value,

        #[arg(short = 'H', long = "header", value_parser = parse_header)]
        headers: Vec<(String, String)>,
    },
}

fn parse_endpoint(value: &str) -> Result<(String, String), String> {
    let (service, method) = value
        .split_once('/')
        .ok_or_else(|| format!("Invalid endpoint format: '{value}'. Expected 'Service/Method'",))?;

    if service.trim().is_empty() || method.trim().is_empty() {
        return Err("Service and Method names cannot be empty".to_string());
    }

    Ok((service.to_string(), method.to_string()))
}

fn parse_header(s: &str) -> Result<(String, String), String> {
    s.split_once(':')
        .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
        .ok_or_else(|| "Format must be 'key:value'".to_string())
}

fn parse_body(value: &str) -> Result<serde_json::Value, String> {
    serde_json::from_str(value).map_err(|e| format!("Invalid JSON: {e}"))
}
