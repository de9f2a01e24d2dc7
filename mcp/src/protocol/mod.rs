//! JSON-RPC 2.0 protocol layer
//!
//! Message types and the stdio transport used by the MCP server.

pub mod jsonrpc;
pub mod transport;

pub use jsonrpc::{JsonRpcError, JsonRpcRequest, JsonRpcResponse, RequestId};
pub use transport::StdioTransport;
