//! Command execution against the external i2c-tools binaries
//!
//! The executor turns a validated command into an argument vector, spawns
//! the configured binary without any shell interpretation, waits for it
//! with a bounded timeout, and maps the outcome into an [`I2cResponse`].
//! Process spawning is abstracted behind [`ProcessRunner`] so the mapping
//! logic is testable with a scripted runner.

use crate::config::I2cConfig;
use crate::types::{CommandPlan, I2cCommand, I2cResponse, Operation};
use crate::validate;
use async_trait::async_trait;
use std::io;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;
use tracing::{error, info, warn};

/// Marker returned as `data` for successful writes.
pub const WRITE_SUCCESSFUL: &str = "Write successful";

/// Exit status and combined output captured from a finished process.
#[derive(Debug, Clone)]
pub struct ProcessOutput {
    /// Exit code, `None` when the process was terminated by a signal
    pub status: Option<i32>,
    /// Captured stdout with stderr appended, line-oriented
    pub output: String,
}

impl ProcessOutput {
    pub fn success(&self) -> bool {
        self.status == Some(0)
    }
}

/// Launches a named program with an argument vector and captures its
/// outcome. Arguments are always passed as a vector, never concatenated
/// into a shell string.
#[async_trait]
pub trait ProcessRunner: Send + Sync {
    async fn run(&self, program: &Path, args: &[String]) -> io::Result<ProcessOutput>;
}

#[async_trait]
impl<T: ProcessRunner + ?Sized> ProcessRunner for Box<T> {
    async fn run(&self, program: &Path, args: &[String]) -> io::Result<ProcessOutput> {
        (**self).run(program, args).await
    }
}

/// Runner backed by `tokio::process`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

#[async_trait]
impl ProcessRunner for SystemRunner {
    async fn run(&self, program: &Path, args: &[String]) -> io::Result<ProcessOutput> {
        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            // Reaps the child if the executor's bounded wait gives up on us
            .kill_on_drop(true)
            .output()
            .await?;

        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));

        Ok(ProcessOutput {
            status: output.status.code(),
            output: combined,
        })
    }
}

/// Executes I2C commands through the configured i2c-tools binaries.
///
/// Each call validates, spawns exactly one process, and blocks until it
/// finishes or the configured timeout expires. No state is shared between
/// calls beyond the read-only configuration, so concurrent use is safe.
pub struct I2cExecutor<R = SystemRunner> {
    config: I2cConfig,
    runner: R,
}

impl I2cExecutor<SystemRunner> {
    pub fn new(config: I2cConfig) -> Self {
        Self::with_runner(config, SystemRunner)
    }
}

impl<R: ProcessRunner> I2cExecutor<R> {
    pub fn with_runner(config: I2cConfig, runner: R) -> Self {
        Self { config, runner }
    }

    pub fn config(&self) -> &I2cConfig {
        &self.config
    }

    /// Execute a command, capturing every failure into the response.
    ///
    /// Never returns an error: validation failures, the disabled toggle,
    /// launch errors, timeouts, and non-zero exits all come back as
    /// `success == false` with a human-readable reason.
    pub async fn execute(&self, command: &I2cCommand) -> I2cResponse {
        if !self.config.enabled {
            warn!("I2C commands are disabled");
            return I2cResponse::fail("I2C commands are disabled", "");
        }

        let plan = match validate::validate(command) {
            Ok(plan) => plan,
            Err(e) => {
                error!(error = %e, "Rejected I2C command");
                return I2cResponse::fail(e.to_string(), "");
            }
        };

        info!(
            operation = plan.operation.as_str(),
            bus = plan.bus,
            address = %plan.address,
            register = %plan.register,
            "Executing I2C command"
        );

        let program = match plan.operation {
            Operation::Read => self.config.i2cget_path.clone(),
            Operation::Write => self.config.i2cset_path.clone(),
        };
        let args = build_args(&plan);
        let cmd_string = render_command(&program, &args);

        let waited = tokio::time::timeout(
            self.config.command_timeout(),
            self.runner.run(&program, &args),
        )
        .await;

        let outcome = match waited {
            Ok(outcome) => outcome,
            Err(_) => {
                error!(command = %cmd_string, "I2C command timed out");
                return I2cResponse::fail(
                    format!(
                        "Command timed out after {}s",
                        self.config.command_timeout_secs
                    ),
                    cmd_string,
                );
            }
        };

        let output = match outcome {
            Ok(output) => output,
            Err(e) => {
                error!(error = %e, command = %cmd_string, "Failed to launch I2C command");
                return I2cResponse::fail(format!("Error executing command: {e}"), cmd_string);
            }
        };

        if output.success() {
            match plan.operation {
                Operation::Read => {
                    let data = output.output.trim().to_string();
                    info!(data = %data, "Read command successful");
                    I2cResponse::ok(data, cmd_string)
                }
                Operation::Write => {
                    info!("Write command successful");
                    I2cResponse::ok(WRITE_SUCCESSFUL, cmd_string)
                }
            }
        } else {
            error!(
                status = ?output.status,
                command = %cmd_string,
                "I2C command failed"
            );
            I2cResponse::fail(format!("Command failed: {}", output.output), cmd_string)
        }
    }
}

/// Build the argument vector for a validated command.
///
/// Read:  `-y <bus> <address> <register> [mode]`
/// Write: `-y <bus> <address> <register> <value> [mode]`
fn build_args(plan: &CommandPlan) -> Vec<String> {
    let mut args = vec![
        "-y".to_string(),
        plan.bus.to_string(),
        plan.address.clone(),
        plan.register.clone(),
    ];
    if let Some(value) = &plan.value {
        args.push(value.clone());
    }
    if let Some(mode) = &plan.mode {
        args.push(mode.as_arg());
    }
    args
}

fn render_command(program: &Path, args: &[String]) -> String {
    let mut parts = vec![program.display().to_string()];
    parts.extend(args.iter().cloned());
    parts.join(" ")
}
