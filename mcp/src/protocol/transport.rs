//! Line-delimited stdio transport
//!
//! One JSON-RPC message per line: requests are read from stdin, responses
//! written to stdout followed by a newline and a flush. Anything the
//! server logs must go to stderr to keep this channel clean.

use super::{JsonRpcRequest, JsonRpcResponse};
use crate::error::{McpError, Result};
use tokio::io::{self, AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::debug;

/// Stdio transport for JSON-RPC messages.
pub struct StdioTransport {
    stdin: BufReader<io::Stdin>,
    stdout: io::Stdout,
}

impl StdioTransport {
    pub fn new() -> Self {
        Self {
            stdin: BufReader::new(io::stdin()),
            stdout: io::stdout(),
        }
    }

    /// Read the next request, skipping blank lines. Returns `None` on EOF.
    pub async fn read_request(&mut self) -> Result<Option<JsonRpcRequest>> {
        let mut line = String::new();
        loop {
            line.clear();
            if self.stdin.read_line(&mut line).await? == 0 {
                return Ok(None);
            }

            let raw = line.trim();
            if raw.is_empty() {
                continue;
            }

            let request: JsonRpcRequest = serde_json::from_str(raw)
                .map_err(|e| McpError::Protocol(format!("Invalid JSON: {e}")))?;
            debug!(method = %request.method, "Received JSON-RPC request");
            return Ok(Some(request));
        }
    }

    /// Serialize a response onto stdout as a single line.
    pub async fn write_response(&mut self, response: &JsonRpcResponse) -> Result<()> {
        let json = serde_json::to_string(response)?;
        debug!(len = json.len(), "Sending JSON-RPC response");

        self.stdout.write_all(json.as_bytes()).await?;
        self.stdout.write_all(b"\n").await?;
        self.stdout.flush().await?;
        Ok(())
    }

    /// Flush any buffered output before shutdown.
    pub async fn close(&mut self) -> Result<()> {
        self.stdout.flush().await?;
        Ok(())
    }
}

impl Default for StdioTransport {
    fn default() -> Self {
        Self::new()
    }
}
