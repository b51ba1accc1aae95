use colored::*;
use turborpc_core::{CallError, RpcError, WireValue};

/// A wrapper struct for a formatted, colored string.
///
/// Implements `Display` so it can be printed directly.
pub struct FormattedString(pub String);

/// The output of a successful call, `None` when the server sent no `output` field.
pub struct CallOutput(pub Option<WireValue>);

impl std::fmt::Display for FormattedString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f)?;
        writeln!(f, "{}", self.0)?;
        Ok(())
    }
}

impl From<serde_json::Value> for FormattedString {
    fn from(value: serde_json::Value) -> Self {
        FormattedString(serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string()))
    }
}

impl From<CallOutput> for FormattedString {
    fn from(CallOutput(output): CallOutput) -> Self {
        match output {
            Some(value) => FormattedString::from(value.into_json()),
            None => FormattedString("(no output)".yellow().to_string()),
        }
    }
}

impl From<RpcError> for FormattedString {
    fn from(err: RpcError) -> Self {
        FormattedString(format!(
            "{} status={} service={} method={} message={:?}",
            "RPC Failed:".red().bold(),
            err.status,
            err.service,
            err.method,
            err.message
        ))
    }
}

impl From<CallError> for FormattedString {
    fn from(err: CallError) -> Self {
        FormattedString(format!("{}\n\n'{}'", "Call Failed:".red().bold(), err))
    }
}
