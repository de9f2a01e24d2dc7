//! Command validation
//!
//! Checks a caller-supplied [`I2cCommand`] against the syntactic and range
//! rules before anything is executed. The checked values end up as
//! arguments to a privileged external binary, so this is a security
//! boundary, not just type-checking: nothing that fails here ever reaches
//! the executor.

use crate::error::ValidationError;
use crate::types::{CommandPlan, I2cCommand, Mode, Operation};

/// Highest bus number accepted. A fixed safety limit, not a hardware
/// constraint.
pub const MAX_BUS_NUMBER: i32 = 10;

/// Largest block transfer length accepted for "i N" mode.
pub const MAX_BLOCK_LEN: u8 = 32;

/// Validate a command, resolving its strings into a [`CommandPlan`].
///
/// Rules are applied in a fixed order and the first failure wins: bus
/// range, address, register, operation, value (writes only), mode.
/// Validation is pure; calling it twice on the same command yields the
/// same result.
pub fn validate(cmd: &I2cCommand) -> Result<CommandPlan, ValidationError> {
    if cmd.bus < 0 || cmd.bus > MAX_BUS_NUMBER {
        return Err(ValidationError::InvalidBus(cmd.bus));
    }

    if !is_hex_token(&cmd.address) {
        return Err(ValidationError::InvalidAddress(cmd.address.clone()));
    }

    if !is_hex_token(&cmd.register) {
        return Err(ValidationError::InvalidRegister(cmd.register.clone()));
    }

    let operation = parse_operation(&cmd.operation)?;

    let value = match operation {
        Operation::Write => match cmd.value.as_deref() {
            None => return Err(ValidationError::MissingValue),
            Some(v) if !is_hex_token(v) => {
                return Err(ValidationError::InvalidValue(v.to_string()))
            }
            Some(v) => Some(v.to_string()),
        },
        // Ignored on reads even if supplied
        Operation::Read => None,
    };

    let mode = parse_mode(cmd.mode.as_deref())?;

    Ok(CommandPlan {
        bus: cmd.bus as u8,
        address: cmd.address.clone(),
        register: cmd.register.clone(),
        value,
        operation,
        mode,
    })
}

/// Check for a 0x/0X-prefixed token of 1-2 hex digits.
fn is_hex_token(s: &str) -> bool {
    let digits = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(d) => d,
        None => return false,
    };
    (1..=2).contains(&digits.len()) && digits.chars().all(|c| c.is_ascii_hexdigit())
}

fn parse_operation(op: &str) -> Result<Operation, ValidationError> {
    if op.eq_ignore_ascii_case("read") {
        Ok(Operation::Read)
    } else if op.eq_ignore_ascii_case("write") {
        Ok(Operation::Write)
    } else {
        Err(ValidationError::InvalidOperation(op.to_string()))
    }
}

/// Parse an optional mode string.
///
/// Accepted: "b", "w" (any case), or "i"/"I" with an optional single space
/// and a decimal count. The count range is checked after parsing rather
/// than being encoded in the token grammar. Absent, empty, and
/// all-whitespace modes all mean "no mode".
fn parse_mode(mode: Option<&str>) -> Result<Option<Mode>, ValidationError> {
    let raw = match mode {
        Some(m) => m,
        None => return Ok(None),
    };
    let token = raw.trim();
    if token.is_empty() {
        return Ok(None);
    }

    if token.eq_ignore_ascii_case("b") {
        return Ok(Some(Mode::Byte));
    }
    if token.eq_ignore_ascii_case("w") {
        return Ok(Some(Mode::Word));
    }

    if let Some(rest) = token.strip_prefix('i').or_else(|| token.strip_prefix('I')) {
        let count = rest.strip_prefix(' ').unwrap_or(rest);
        return match count.parse::<i64>() {
            Ok(n) if n >= 1 && n <= i64::from(MAX_BLOCK_LEN) => Ok(Some(Mode::Block(n as u8))),
            _ => Err(ValidationError::InvalidMode(raw.to_string())),
        };
    }

    Err(ValidationError::InvalidMode(raw.to_string()))
}
