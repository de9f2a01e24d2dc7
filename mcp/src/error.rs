//! Error types for the MCP server

use crate::protocol::JsonRpcError;
use thiserror::Error;

/// Result type for MCP operations
pub type Result<T> = std::result::Result<T, McpError>;

/// MCP server errors
#[derive(Debug, Error)]
pub enum McpError {
    /// Invalid JSON-RPC envelope
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// Method does not exist
    #[error("Method not found: {0}")]
    MethodNotFound(String),

    /// Malformed method parameters
    #[error("Invalid parameters: {0}")]
    InvalidParams(String),

    /// I/O error on the transport
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl McpError {
    /// Convert to a JSON-RPC error object.
    pub fn to_jsonrpc(&self) -> JsonRpcError {
        match self {
            McpError::Protocol(msg) => JsonRpcError::invalid_request(msg),
            McpError::MethodNotFound(method) => JsonRpcError::method_not_found(method),
            McpError::InvalidParams(msg) => JsonRpcError::invalid_params(msg),
            McpError::Io(e) => JsonRpcError::internal_error(e.to_string()),
            McpError::Json(e) => JsonRpcError::invalid_params(e.to_string()),
            McpError::Internal(msg) => JsonRpcError::internal_error(msg),
        }
    }
}
