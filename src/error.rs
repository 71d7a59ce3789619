//! Errors raised by the tool surface.
//!
//! Upstream failures are not errors here: the upstream client folds them
//! into [`crate::upstream::NormalizedError`] and the adapters hand that back
//! as data.

/// Error types for tool invocations
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    /// No adapter is registered under this name
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// Caller-supplied arguments failed to deserialize or validate
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// The upstream answered 2xx but the nested payload could not be decoded
    #[error("Malformed upstream payload: {0}")]
    MalformedUpstreamPayload(String),
}

impl ToolError {
    /// JSON-RPC error code reported for this error.
    pub fn rpc_code(&self) -> i32 {
        match self {
            ToolError::UnknownTool(_) | ToolError::InvalidArguments(_) => -32602,
            ToolError::MalformedUpstreamPayload(_) => -32603,
        }
    }
}
