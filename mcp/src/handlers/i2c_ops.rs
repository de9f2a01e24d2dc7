//! I2C tool-call dispatch
//!
//! Maps a tool name plus a JSON argument object onto an [`I2cCommand`]
//! and runs it through the executor. Argument problems (unknown tool,
//! missing or unparseable arguments) become error tool results, never
//! protocol errors, so callers always get a `content` payload back.

use rpi2c_i2c::{I2cCommand, I2cExecutor, ProcessRunner};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

/// Tool name for register reads.
pub const TOOL_I2CGET: &str = "i2cget";

/// Tool name for register writes.
pub const TOOL_I2CSET: &str = "i2cset";

/// One content block of a tool result.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ToolContent {
    #[serde(rename = "type")]
    pub kind: String,
    pub text: String,
}

impl ToolContent {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            kind: "text".to_string(),
            text: text.into(),
        }
    }
}

/// Result of an MCP tool call.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ToolResult {
    pub content: Vec<ToolContent>,

    #[serde(rename = "isError")]
    pub is_error: bool,
}

impl ToolResult {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            content: vec![ToolContent::text(text)],
            is_error: false,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            content: vec![ToolContent::text(text)],
            is_error: true,
        }
    }

    /// Text of the first content block.
    pub fn first_text(&self) -> &str {
        self.content.first().map(|c| c.text.as_str()).unwrap_or("")
    }
}

/// Dispatch a named tool call to the executor.
pub async fn dispatch<R: ProcessRunner>(
    executor: &I2cExecutor<R>,
    name: &str,
    args: &Value,
) -> ToolResult {
    info!(tool = name, "Dispatching tool call");

    let command = match name {
        TOOL_I2CGET => i2cget_command(args),
        TOOL_I2CSET => i2cset_command(args),
        other => return ToolResult::error(format!("Unknown tool: {other}")),
    };

    let command = match command {
        Ok(command) => command,
        Err(text) => return ToolResult::error(text),
    };

    let response = executor.execute(&command).await;
    if response.success {
        ToolResult::success(response.data.unwrap_or_default())
    } else {
        ToolResult::error(response.error.unwrap_or_else(|| "Unknown error".to_string()))
    }
}

fn i2cget_command(args: &Value) -> Result<I2cCommand, String> {
    let bus = int_argument(args, "bus")?;
    let address = string_argument(args, "address")?;
    let register = string_argument(args, "register")?;
    let mut command = I2cCommand::read(bus, address, register);
    command.mode = optional_string(args, "mode");
    Ok(command)
}

fn i2cset_command(args: &Value) -> Result<I2cCommand, String> {
    let bus = int_argument(args, "bus")?;
    let address = string_argument(args, "address")?;
    let register = string_argument(args, "register")?;
    let value = string_argument(args, "value")?;
    let mut command = I2cCommand::write(bus, address, register, value);
    command.mode = optional_string(args, "mode");
    Ok(command)
}

fn require<'a>(args: &'a Value, name: &str) -> Result<&'a Value, String> {
    match args.get(name) {
        Some(v) if !v.is_null() => Ok(v),
        _ => Err(format!("Missing required argument: {name}")),
    }
}

/// Integer argument: numeric values are taken directly, strings are
/// parsed base-10, anything else fails the whole call.
fn int_argument(args: &Value, name: &str) -> Result<i32, String> {
    let v = require(args, name)?;
    if let Some(n) = v.as_i64() {
        return Ok(n as i32);
    }
    let text = match v.as_str() {
        Some(s) => s.to_string(),
        None => v.to_string(),
    };
    text.parse::<i32>()
        .map_err(|e| format!("Invalid value for argument '{name}': {e}"))
}

fn string_argument(args: &Value, name: &str) -> Result<String, String> {
    let v = require(args, name)?;
    Ok(match v.as_str() {
        Some(s) => s.to_string(),
        None => v.to_string(),
    })
}

fn optional_string(args: &Value, name: &str) -> Option<String> {
    match args.get(name) {
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Null) | None => None,
        Some(other) => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use rpi2c_i2c::{I2cConfig, ProcessOutput};
    use serde_json::json;
    use std::io;
    use std::path::{Path, PathBuf};
    use std::sync::{Arc, Mutex};

    struct ScriptedRunner {
        status: i32,
        output: String,
        calls: Arc<Mutex<Vec<(PathBuf, Vec<String>)>>>,
    }

    impl ScriptedRunner {
        fn new(status: i32, output: &str) -> Self {
            Self {
                status,
                output: output.to_string(),
                calls: Arc::new(Mutex::new(Vec::new())),
            }
        }
    }

    #[async_trait]
    impl ProcessRunner for ScriptedRunner {
        async fn run(&self, program: &Path, args: &[String]) -> io::Result<ProcessOutput> {
            self.calls
                .lock()
                .unwrap()
                .push((program.to_path_buf(), args.to_vec()));
            Ok(ProcessOutput {
                status: Some(self.status),
                output: self.output.clone(),
            })
        }
    }

    fn executor(status: i32, output: &str) -> I2cExecutor<ScriptedRunner> {
        I2cExecutor::with_runner(I2cConfig::default(), ScriptedRunner::new(status, output))
    }

    #[tokio::test]
    async fn unknown_tool_is_an_error_result() {
        let executor = executor(0, "");
        let result = dispatch(&executor, "i2cdump", &json!({})).await;
        assert!(result.is_error);
        assert_eq!(result.first_text(), "Unknown tool: i2cdump");
    }

    #[tokio::test]
    async fn i2cget_reads_a_register() {
        let executor = executor(0, "0x42\n");
        let args = json!({"bus": 1, "address": "0x48", "register": "0x00"});
        let result = dispatch(&executor, TOOL_I2CGET, &args).await;

        assert!(!result.is_error);
        assert_eq!(result.first_text(), "0x42");
    }

    #[tokio::test]
    async fn i2cset_writes_a_register() {
        let executor = executor(0, "");
        let args = json!({"bus": 1, "address": "0x48", "register": "0x00", "value": "0xFF"});
        let result = dispatch(&executor, TOOL_I2CSET, &args).await;

        assert!(!result.is_error);
        assert_eq!(result.first_text(), "Write successful");
    }

    #[tokio::test]
    async fn missing_arguments_fail_in_declared_order() {
        let executor = executor(0, "");

        let result = dispatch(&executor, TOOL_I2CGET, &json!({})).await;
        assert_eq!(result.first_text(), "Missing required argument: bus");

        let result = dispatch(&executor, TOOL_I2CGET, &json!({"bus": 1})).await;
        assert_eq!(result.first_text(), "Missing required argument: address");

        let result =
            dispatch(&executor, TOOL_I2CGET, &json!({"bus": 1, "address": "0x48"})).await;
        assert_eq!(result.first_text(), "Missing required argument: register");

        let args = json!({"bus": 1, "address": "0x48", "register": "0x00"});
        let result = dispatch(&executor, TOOL_I2CSET, &args).await;
        assert_eq!(result.first_text(), "Missing required argument: value");
    }

    #[tokio::test]
    async fn textual_bus_is_parsed_base_10() {
        let executor = executor(0, "0x42\n");
        let args = json!({"bus": "1", "address": "0x48", "register": "0x00"});
        let result = dispatch(&executor, TOOL_I2CGET, &args).await;
        assert!(!result.is_error);
    }

    #[tokio::test]
    async fn unparseable_bus_fails_the_call() {
        let executor = executor(0, "0x42\n");
        let args = json!({"bus": "one", "address": "0x48", "register": "0x00"});
        let result = dispatch(&executor, TOOL_I2CGET, &args).await;
        assert!(result.is_error);
        assert!(result.first_text().contains("bus"));
    }

    #[tokio::test]
    async fn mode_is_forwarded_to_the_command() {
        let runner = ScriptedRunner::new(0, "0x11 0x22\n");
        let calls = runner.calls.clone();
        let executor = I2cExecutor::with_runner(I2cConfig::default(), runner);

        let args = json!({"bus": 1, "address": "0x48", "register": "0x00", "mode": "i 2"});
        let result = dispatch(&executor, TOOL_I2CGET, &args).await;

        assert!(!result.is_error);
        let calls = calls.lock().unwrap();
        assert_eq!(calls[0].1.last().map(String::as_str), Some("i 2"));
    }

    #[tokio::test]
    async fn executor_failures_surface_as_error_results() {
        let executor = executor(1, "Error: Read failed\n");
        let args = json!({"bus": 1, "address": "0x48", "register": "0x00"});
        let result = dispatch(&executor, TOOL_I2CGET, &args).await;

        assert!(result.is_error);
        assert!(result.first_text().starts_with("Command failed:"));
    }

    #[test]
    fn tool_result_serializes_with_is_error_casing() {
        let raw = serde_json::to_string(&ToolResult::error("boom")).unwrap();
        assert!(raw.contains("\"isError\":true"));
        assert!(raw.contains("\"type\":\"text\""));
    }
}
