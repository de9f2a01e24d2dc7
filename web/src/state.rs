//! Shared application state

use rpi2c_i2c::{I2cConfig, I2cExecutor, ProcessRunner, SystemRunner};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Executor type shared by the HTTP handlers; boxed so tests can swap in
/// a scripted runner.
pub type BridgeExecutor = I2cExecutor<Box<dyn ProcessRunner>>;

/// Server identity returned by the discovery endpoint.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ServerInfo {
    pub name: String,
    pub version: String,
    pub description: String,
    pub protocol: String,
}

impl Default for ServerInfo {
    fn default() -> Self {
        Self {
            name: "rpi2c".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            description: "MCP server for executing I2C commands on Raspberry Pi".to_string(),
            protocol: "mcp".to_string(),
        }
    }
}

/// State handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub executor: Arc<BridgeExecutor>,
    pub info: ServerInfo,
}

impl AppState {
    pub fn new(config: I2cConfig) -> Self {
        Self::with_runner(config, Box::new(SystemRunner))
    }

    pub fn with_runner(config: I2cConfig, runner: Box<dyn ProcessRunner>) -> Self {
        Self {
            executor: Arc::new(I2cExecutor::with_runner(config, runner)),
            info: ServerInfo::default(),
        }
    }
}
