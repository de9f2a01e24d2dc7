//! I2C command core for the rpi2c bridge
//!
//! Validates caller-supplied I2C read/write commands and executes them by
//! shelling out to the i2c-tools binaries (`i2cget`, `i2cset`). The bus
//! itself is never touched in-process.
//!
//! # Architecture
//!
//! - **Types**: request/response DTOs and the closed `Operation`/`Mode` enums
//! - **Validator**: pure, ordered rule checks producing a `CommandPlan`
//! - **Executor**: argv construction, process spawn, outcome mapping
//! - **Config**: binary paths, enable toggle, timeout, TOML loading
//!
//! Every failure mode (validation, disabled, launch error, non-zero exit,
//! timeout) is captured into an [`I2cResponse`]; nothing is raised past
//! [`I2cExecutor::execute`].

pub mod config;
pub mod error;
pub mod exec;
pub mod types;
pub mod validate;

pub use config::{ConfigLoader, I2cConfig, ServiceConfig};
pub use error::{ConfigError, ValidationError};
pub use exec::{I2cExecutor, ProcessOutput, ProcessRunner, SystemRunner};
pub use types::{CommandPlan, I2cCommand, I2cResponse, Mode, Operation};
pub use validate::validate;
