//! MCP tool definitions
//!
//! The schemas are static data; dispatch relies on their `required` lists
//! (bus, address, register, then value for writes) matching the order the
//! handlers check arguments in.

use crate::handlers::i2c_ops::{TOOL_I2CGET, TOOL_I2CSET};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Tool definition advertised over tools/list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,

    pub description: String,

    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

/// All tools this server exposes.
pub fn all_tools() -> Vec<ToolDefinition> {
    vec![tool_i2cget(), tool_i2cset()]
}

fn tool_i2cget() -> ToolDefinition {
    ToolDefinition {
        name: TOOL_I2CGET.to_string(),
        description: "Read from an I2C device register. Returns the value in hex format."
            .to_string(),
        input_schema: json!({
            "type": "object",
            "properties": {
                "bus": {
                    "type": "integer",
                    "description": "I2C bus number (typically 0 or 1 on Raspberry Pi)"
                },
                "address": {
                    "type": "string",
                    "description": "I2C device address in hex format (e.g., 0x48)"
                },
                "register": {
                    "type": "string",
                    "description": "Register address to read from in hex format (e.g., 0x00)"
                },
                "mode": {
                    "type": "string",
                    "description": "Data mode: 'b' (byte), 'w' (word), or 'i N' (block of N bytes, 1-32)"
                }
            },
            "required": ["bus", "address", "register"]
        }),
    }
}

fn tool_i2cset() -> ToolDefinition {
    ToolDefinition {
        name: TOOL_I2CSET.to_string(),
        description: "Write to an I2C device register.".to_string(),
        input_schema: json!({
            "type": "object",
            "properties": {
                "bus": {
                    "type": "integer",
                    "description": "I2C bus number (typically 0 or 1 on Raspberry Pi)"
                },
                "address": {
                    "type": "string",
                    "description": "I2C device address in hex format (e.g., 0x48)"
                },
                "register": {
                    "type": "string",
                    "description": "Register address to write to in hex format (e.g., 0x00)"
                },
                "value": {
                    "type": "string",
                    "description": "Value to write in hex format (e.g., 0xFF)"
                },
                "mode": {
                    "type": "string",
                    "description": "Data mode: 'b' (byte), 'w' (word), or 'i N' (block of N bytes, 1-32)"
                }
            },
            "required": ["bus", "address", "register", "value"]
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_tools_are_listed() {
        let tools = all_tools();
        let names: Vec<&str> = tools.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["i2cget", "i2cset"]);
    }

    #[test]
    fn required_lists_match_dispatch_order() {
        let tools = all_tools();
        assert_eq!(
            tools[0].input_schema["required"],
            json!(["bus", "address", "register"])
        );
        assert_eq!(
            tools[1].input_schema["required"],
            json!(["bus", "address", "register", "value"])
        );
    }

    #[test]
    fn schema_serializes_with_input_schema_casing() {
        let raw = serde_json::to_string(&all_tools()[0]).unwrap();
        assert!(raw.contains("\"inputSchema\""));
        assert!(raw.contains("\"i2cget\""));
    }
}
