//! MCP server
//!
//! Routes JSON-RPC requests read from the stdio transport to the tool
//! registry and dispatch. Tool failures are carried inside successful
//! responses (`isError` on the tool result); JSON-RPC errors are reserved
//! for protocol-level problems.

pub mod tools;

use crate::error::{McpError, Result};
use crate::handlers::i2c_ops;
use crate::protocol::{JsonRpcError, JsonRpcRequest, JsonRpcResponse, RequestId, StdioTransport};
use rpi2c_i2c::{I2cExecutor, ProcessRunner, SystemRunner};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{error, info, warn};

pub use tools::{all_tools, ToolDefinition};

/// MCP protocol revision this server implements.
const PROTOCOL_VERSION: &str = "2024-11-05";

/// Server identity reported during initialize.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub name: String,
    pub version: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: "rpi2c-mcp".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// MCP server over stdio.
pub struct McpServer<R = SystemRunner> {
    executor: Arc<I2cExecutor<R>>,
    config: ServerConfig,
}

impl<R: ProcessRunner> McpServer<R> {
    pub fn new(executor: I2cExecutor<R>, config: ServerConfig) -> Self {
        info!(
            server = config.name,
            version = config.version,
            "MCP server initialized"
        );
        Self {
            executor: Arc::new(executor),
            config,
        }
    }

    /// Serve requests until the client disconnects.
    pub async fn serve_stdio(&self) -> Result<()> {
        let mut transport = StdioTransport::new();

        info!("MCP server listening on stdio");

        loop {
            let request = match transport.read_request().await {
                Ok(Some(request)) => request,
                Ok(None) => {
                    info!("Client disconnected");
                    break;
                }
                Err(e) => {
                    error!(error = %e, "Failed to read request");
                    let response = JsonRpcResponse::error(None, JsonRpcError::parse_error());
                    transport.write_response(&response).await?;
                    continue;
                }
            };

            let notification = request.is_notification();
            let response = self.handle_request(request).await;

            // Notifications get no reply
            if !notification {
                transport.write_response(&response).await?;
            }
        }

        transport.close().await
    }

    async fn handle_request(&self, request: JsonRpcRequest) -> JsonRpcResponse {
        let id = request.id.clone();

        let result = match request.method.as_str() {
            "initialize" => self.handle_initialize(),
            "tools/list" => self.handle_tools_list(),
            "tools/call" => self.handle_tool_call(request.params).await,
            _ => Err(McpError::MethodNotFound(request.method.clone())),
        };

        match result {
            Ok(value) => JsonRpcResponse::success(id.unwrap_or(RequestId::Number(0)), value),
            Err(e) => {
                warn!(error = %e, method = %request.method, "Request failed");
                JsonRpcResponse::error(id, e.to_jsonrpc())
            }
        }
    }

    fn handle_initialize(&self) -> Result<Value> {
        info!("Received initialize request");

        Ok(json!({
            "protocolVersion": PROTOCOL_VERSION,
            "capabilities": {
                "tools": {}
            },
            "serverInfo": {
                "name": self.config.name,
                "version": self.config.version
            }
        }))
    }

    fn handle_tools_list(&self) -> Result<Value> {
        Ok(json!({ "tools": all_tools() }))
    }

    async fn handle_tool_call(&self, params: Option<Value>) -> Result<Value> {
        let params =
            params.ok_or_else(|| McpError::InvalidParams("Missing parameters".to_string()))?;

        let name = params["name"]
            .as_str()
            .ok_or_else(|| McpError::InvalidParams("Missing tool name".to_string()))?;
        let arguments = params.get("arguments").cloned().unwrap_or(Value::Null);

        info!(tool = name, "Calling tool");

        // Every tool outcome, including failures, is a successful
        // JSON-RPC response carrying isError.
        let result = i2c_ops::dispatch(&self.executor, name, &arguments).await;
        Ok(serde_json::to_value(result)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use rpi2c_i2c::{I2cConfig, ProcessOutput};
    use std::io;
    use std::path::Path;

    struct EchoRunner;

    #[async_trait]
    impl ProcessRunner for EchoRunner {
        async fn run(&self, _program: &Path, _args: &[String]) -> io::Result<ProcessOutput> {
            Ok(ProcessOutput {
                status: Some(0),
                output: "0x42\n".to_string(),
            })
        }
    }

    fn server() -> McpServer<EchoRunner> {
        McpServer::new(
            I2cExecutor::with_runner(I2cConfig::default(), EchoRunner),
            ServerConfig::default(),
        )
    }

    fn request(method: &str, params: Option<Value>) -> JsonRpcRequest {
        JsonRpcRequest::new(RequestId::Number(1), method, params)
    }

    #[tokio::test]
    async fn initialize_reports_server_info() {
        let response = server().handle_request(request("initialize", None)).await;
        let result = response.result.unwrap();
        assert_eq!(result["protocolVersion"], PROTOCOL_VERSION);
        assert_eq!(result["serverInfo"]["name"], "rpi2c-mcp");
    }

    #[tokio::test]
    async fn tools_list_returns_both_tools() {
        let response = server().handle_request(request("tools/list", None)).await;
        let result = response.result.unwrap();
        assert_eq!(result["tools"].as_array().unwrap().len(), 2);
        assert_eq!(result["tools"][0]["name"], "i2cget");
    }

    #[tokio::test]
    async fn unknown_method_is_a_jsonrpc_error() {
        let response = server()
            .handle_request(request("resources/list", None))
            .await;
        assert_eq!(response.error.unwrap().code, -32601);
    }

    #[tokio::test]
    async fn tool_call_success_carries_the_data() {
        let params = json!({
            "name": "i2cget",
            "arguments": {"bus": 1, "address": "0x48", "register": "0x00"}
        });
        let response = server()
            .handle_request(request("tools/call", Some(params)))
            .await;
        let result = response.result.unwrap();
        assert_eq!(result["isError"], false);
        assert_eq!(result["content"][0]["text"], "0x42");
    }

    #[tokio::test]
    async fn tool_failure_is_not_a_jsonrpc_error() {
        let params = json!({
            "name": "i2cget",
            "arguments": {"bus": -1, "address": "0x48", "register": "0x00"}
        });
        let response = server()
            .handle_request(request("tools/call", Some(params)))
            .await;
        assert!(response.error.is_none());
        let result = response.result.unwrap();
        assert_eq!(result["isError"], true);
        assert!(result["content"][0]["text"]
            .as_str()
            .unwrap()
            .contains("Invalid bus number"));
    }

    #[tokio::test]
    async fn tool_call_without_params_is_invalid() {
        let response = server().handle_request(request("tools/call", None)).await;
        assert_eq!(response.error.unwrap().code, -32602);
    }

    #[tokio::test]
    async fn unknown_tool_name_is_an_error_result() {
        let params = json!({"name": "i2cdump", "arguments": {}});
        let response = server()
            .handle_request(request("tools/call", Some(params)))
            .await;
        let result = response.result.unwrap();
        assert_eq!(result["isError"], true);
        assert_eq!(result["content"][0]["text"], "Unknown tool: i2cdump");
    }
}
