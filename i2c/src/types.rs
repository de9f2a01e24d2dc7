//! Request and response types for I2C command execution

use serde::{Deserialize, Serialize};
use std::fmt;

/// Requested bus operation, decided once at validation time.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// Read a register via i2cget
    Read,
    /// Write a register via i2cset
    Write,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Read => "read",
            Operation::Write => "write",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Transfer size mode accepted by i2cget/i2cset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Single byte transfer ("b")
    Byte,
    /// 16-bit word transfer ("w")
    Word,
    /// Block transfer of 1..=32 bytes ("i N")
    Block(u8),
}

impl Mode {
    /// Render the mode the way the external tool expects it, as one
    /// argument ("b", "w", "i 4").
    pub fn as_arg(&self) -> String {
        match self {
            Mode::Byte => "b".to_string(),
            Mode::Word => "w".to_string(),
            Mode::Block(n) => format!("i {n}"),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_arg())
    }
}

/// An I2C command as supplied by a caller, before validation.
///
/// `address`, `register` and `value` are hex text (`0x` or `0X` prefix,
/// 1-2 digits); `operation` is "read" or "write" in any case; `mode` is
/// optional and blank means unset.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct I2cCommand {
    /// I2C bus number (typically 0 or 1 on a Raspberry Pi)
    pub bus: i32,

    /// 7-bit device address in hex format (e.g. "0x48")
    pub address: String,

    /// Register address in hex format (e.g. "0x00")
    pub register: String,

    /// Value to write in hex format; absent for reads
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,

    /// Operation type: "read" or "write"
    pub operation: String,

    /// Data mode: "b" (byte), "w" (word) or "i N" (block of N bytes)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
}

impl I2cCommand {
    /// Create a read command.
    pub fn read(bus: i32, address: impl Into<String>, register: impl Into<String>) -> Self {
        Self {
            bus,
            address: address.into(),
            register: register.into(),
            value: None,
            operation: "read".to_string(),
            mode: None,
        }
    }

    /// Create a write command.
    pub fn write(
        bus: i32,
        address: impl Into<String>,
        register: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            bus,
            address: address.into(),
            register: register.into(),
            value: Some(value.into()),
            operation: "write".to_string(),
            mode: None,
        }
    }

    /// Attach a raw mode string.
    pub fn with_mode(mut self, mode: impl Into<String>) -> Self {
        self.mode = Some(mode.into());
        self
    }
}

/// Outcome of executing an I2C command.
///
/// `command` holds the space-joined argument vector that was (or would
/// have been) executed; it is empty when validation failed before a
/// command line could be built.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct I2cResponse {
    /// Whether the operation succeeded
    pub success: bool,

    /// Read data, or a fixed marker for successful writes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,

    /// Failure reason when `success` is false
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// The external command line, for diagnostics
    pub command: String,
}

impl I2cResponse {
    /// Successful response carrying data.
    pub fn ok(data: impl Into<String>, command: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(data.into()),
            error: None,
            command: command.into(),
        }
    }

    /// Failed response carrying an error message.
    pub fn fail(error: impl Into<String>, command: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
            command: command.into(),
        }
    }
}

/// A command that passed validation.
///
/// All string fields are known to be well-formed hex tokens and the
/// operation and mode are resolved to their closed enums, so the executor
/// never re-parses caller input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandPlan {
    pub bus: u8,
    pub address: String,
    pub register: String,
    pub value: Option<String>,
    pub operation: Operation,
    pub mode: Option<Mode>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn mode_renders_tool_arguments() {
        assert_eq!(Mode::Byte.as_arg(), "b");
        assert_eq!(Mode::Word.as_arg(), "w");
        assert_eq!(Mode::Block(4).as_arg(), "i 4");
        assert_eq!(Mode::Block(32).as_arg(), "i 32");
    }

    #[test]
    fn command_serializes_without_absent_fields() {
        let cmd = I2cCommand::read(1, "0x48", "0x00");
        let json = serde_json::to_string(&cmd).unwrap();
        assert!(!json.contains("\"value\""));
        assert!(!json.contains("\"mode\""));
        assert!(json.contains("\"operation\":\"read\""));
    }

    #[test]
    fn command_deserializes_from_caller_json() {
        let json = r#"{
            "bus": 1,
            "address": "0x48",
            "register": "0x00",
            "value": "0xFF",
            "operation": "write",
            "mode": "i 4"
        }"#;
        let cmd: I2cCommand = serde_json::from_str(json).unwrap();
        assert_eq!(cmd, I2cCommand::write(1, "0x48", "0x00", "0xFF").with_mode("i 4"));
    }

    #[test]
    fn response_constructors_set_success_flag() {
        let ok = I2cResponse::ok("0x42", "i2cget -y 1 0x48 0x00");
        assert!(ok.success);
        assert_eq!(ok.data.as_deref(), Some("0x42"));
        assert_eq!(ok.error, None);

        let fail = I2cResponse::fail("Invalid bus number: -1", "");
        assert!(!fail.success);
        assert_eq!(fail.data, None);
        assert_eq!(fail.error.as_deref(), Some("Invalid bus number: -1"));
        assert_eq!(fail.command, "");
    }

    #[test]
    fn response_omits_absent_fields_in_json() {
        let ok = I2cResponse::ok("0x42", "cmd");
        let json = serde_json::to_string(&ok).unwrap();
        assert!(!json.contains("\"error\""));

        let fail = I2cResponse::fail("boom", "cmd");
        let json = serde_json::to_string(&fail).unwrap();
        assert!(!json.contains("\"data\""));
    }
}
