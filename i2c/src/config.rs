//! Service configuration
//!
//! Three values drive the core: the paths to the two i2c-tools binaries
//! and the master enable toggle. The surrounding service adds a listen
//! address and a command timeout. Configuration is read-only once loaded;
//! nothing in the core mutates it.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};

/// Default install location of i2cget on Raspberry Pi OS.
pub const DEFAULT_I2CGET: &str = "/usr/sbin/i2cget";

/// Default install location of i2cset on Raspberry Pi OS.
pub const DEFAULT_I2CSET: &str = "/usr/sbin/i2cset";

const CONFIG_FILE: &str = "config.toml";

pub type Result<T, E = ConfigError> = std::result::Result<T, E>;

/// Settings consumed by the executor.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct I2cConfig {
    /// Path to the i2cget binary
    pub i2cget_path: PathBuf,

    /// Path to the i2cset binary
    pub i2cset_path: PathBuf,

    /// Master toggle; when false no command is validated or spawned
    pub enabled: bool,

    /// Bounded wait for the external process, in seconds
    pub command_timeout_secs: u64,
}

impl Default for I2cConfig {
    fn default() -> Self {
        Self {
            i2cget_path: PathBuf::from(DEFAULT_I2CGET),
            i2cset_path: PathBuf::from(DEFAULT_I2CSET),
            enabled: true,
            command_timeout_secs: 30,
        }
    }
}

impl I2cConfig {
    pub fn command_timeout(&self) -> Duration {
        Duration::from_secs(self.command_timeout_secs)
    }

    /// Fall back to a PATH lookup for any configured binary that does not
    /// exist. Keeps the configured path when the lookup finds nothing so
    /// the eventual launch error names what was asked for.
    pub fn resolve_tools(mut self) -> Self {
        if !self.i2cget_path.exists() {
            match which::which("i2cget") {
                Ok(found) => {
                    debug!(path = %found.display(), "Resolved i2cget from PATH");
                    self.i2cget_path = found;
                }
                Err(_) => warn!(
                    path = %self.i2cget_path.display(),
                    "i2cget not found at configured path or on PATH"
                ),
            }
        }
        if !self.i2cset_path.exists() {
            match which::which("i2cset") {
                Ok(found) => {
                    debug!(path = %found.display(), "Resolved i2cset from PATH");
                    self.i2cset_path = found;
                }
                Err(_) => warn!(
                    path = %self.i2cset_path.display(),
                    "i2cset not found at configured path or on PATH"
                ),
            }
        }
        self
    }
}

/// Full service configuration: core settings plus the HTTP listen address.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ServiceConfig {
    /// Address the HTTP server binds to
    pub listen: String,

    /// Executor settings
    pub i2c: I2cConfig,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            listen: "0.0.0.0:8080".to_string(),
            i2c: I2cConfig::default(),
        }
    }
}

/// Loads `config.toml` from a configuration directory.
pub struct ConfigLoader {
    root: PathBuf,
    use_defaults: bool,
}

impl ConfigLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            use_defaults: true,
        }
    }

    /// Loader for the system configuration directory.
    pub fn system() -> Self {
        Self::new("/etc/rpi2c")
    }

    /// Loader for the per-user configuration directory.
    pub fn user() -> Result<Self> {
        let home = std::env::var("HOME")
            .map_err(|_| ConfigError::Invalid("HOME not set".to_string()))?;
        Ok(Self::new(PathBuf::from(home).join(".config/rpi2c")))
    }

    /// Set whether a missing config file falls back to defaults.
    pub fn use_defaults(mut self, use_defaults: bool) -> Self {
        self.use_defaults = use_defaults;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Load the configuration, applying `RPI2C_*` environment overrides
    /// on top of whatever the file (or the defaults) provided.
    pub fn load(&self) -> Result<ServiceConfig> {
        let path = self.root.join(CONFIG_FILE);

        let mut config = if path.exists() {
            let raw = std::fs::read_to_string(&path)?;
            toml::from_str(&raw)?
        } else if self.use_defaults {
            ServiceConfig::default()
        } else {
            return Err(ConfigError::NotFound(path));
        };

        apply_env_overrides(&mut config);
        validate_config(&config)?;
        Ok(config)
    }
}

fn apply_env_overrides(config: &mut ServiceConfig) {
    if let Ok(listen) = std::env::var("RPI2C_LISTEN") {
        config.listen = listen;
    }
    if let Ok(path) = std::env::var("RPI2C_I2CGET") {
        config.i2c.i2cget_path = PathBuf::from(path);
    }
    if let Ok(path) = std::env::var("RPI2C_I2CSET") {
        config.i2c.i2cset_path = PathBuf::from(path);
    }
    if let Ok(enabled) = std::env::var("RPI2C_ENABLED") {
        config.i2c.enabled = !matches!(enabled.as_str(), "0" | "false" | "no" | "off");
    }
    if let Ok(timeout) = std::env::var("RPI2C_TIMEOUT_SECS") {
        if let Ok(secs) = timeout.parse() {
            config.i2c.command_timeout_secs = secs;
        }
    }
}

fn validate_config(config: &ServiceConfig) -> Result<()> {
    if config.listen.trim().is_empty() {
        return Err(ConfigError::Invalid("listen address is empty".to_string()));
    }
    if config.i2c.i2cget_path.as_os_str().is_empty() {
        return Err(ConfigError::Invalid("i2cget_path is empty".to_string()));
    }
    if config.i2c.i2cset_path.as_os_str().is_empty() {
        return Err(ConfigError::Invalid("i2cset_path is empty".to_string()));
    }
    Ok(())
}
