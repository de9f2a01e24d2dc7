//! # rpi2c MCP Server
//!
//! Model Context Protocol (MCP) server for the rpi2c I2C bridge. Exposes
//! the `i2cget` and `i2cset` tools to AI assistants over a JSON-RPC 2.0
//! stdio transport, and provides the tool registry and dispatch logic
//! shared with the HTTP surface.
//!
//! ## Architecture
//!
//! - **Protocol layer**: JSON-RPC 2.0 types and the stdio transport
//! - **Server layer**: request routing (`initialize`, `tools/list`,
//!   `tools/call`)
//! - **Handler layer**: tool-call dispatch into the I2C executor
//!
//! Tool execution failures are never JSON-RPC errors: every tool outcome
//! is a successful response whose [`ToolResult`] carries an `isError`
//! flag.

pub mod error;
pub mod handlers;
pub mod protocol;
pub mod server;

pub use error::{McpError, Result};
pub use handlers::i2c_ops::{dispatch, ToolContent, ToolResult, TOOL_I2CGET, TOOL_I2CSET};
pub use protocol::{JsonRpcError, JsonRpcRequest, JsonRpcResponse, RequestId, StdioTransport};
pub use server::{all_tools, McpServer, ServerConfig, ToolDefinition};
