//! Running `tfc-cli`.
//!
//! [`CommandRunner`] is the seam between assembled commands and the
//! process that carries them out. [`ProcessRunner`] spawns the real tool;
//! [`RecordingRunner`] records commands for tests and dry runs.

pub mod command;

use std::process::{Command, Stdio};

pub use command::{DEFAULT_TOOL_PATH, TfcCommand, WorkspaceTarget, assemble_commands};

use crate::{Error, Result};

/// Executes one assembled `tfc-cli` command.
pub trait CommandRunner {
    fn run(&mut self, command: &TfcCommand) -> Result<()>;
}

/// Production runner: spawns the tool and waits for it to exit.
///
/// The tool's stdout is sent to our stderr, so its output still shows up in
/// the CI log while our stdout carries only the run report.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

impl CommandRunner for ProcessRunner {
    fn run(&mut self, command: &TfcCommand) -> Result<()> {
        let status = Command::new(command.program())
            .args(&command.args()[1..])
            .stdout(Stdio::from(std::io::stderr()))
            .status()
            .map_err(|source| Error::ToolSpawn {
                program: command.program().to_string(),
                source,
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(Error::ToolFailed {
                subcommand: command.subcommand().to_string(),
                status: status.to_string(),
            })
        }
    }
}

/// Test-double runner that records commands instead of running them.
///
/// Can be primed to fail at a given call, to exercise abort behavior.
#[derive(Debug, Default)]
pub struct RecordingRunner {
    commands: Vec<TfcCommand>,
    fail_at: Option<usize>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the call with zero-based index `index` (it is still recorded).
    pub fn failing_at(index: usize) -> Self {
        Self {
            commands: Vec::new(),
            fail_at: Some(index),
        }
    }

    pub fn executed_commands(&self) -> &[TfcCommand] {
        &self.commands
    }

    pub fn into_commands(self) -> Vec<TfcCommand> {
        self.commands
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&mut self, command: &TfcCommand) -> Result<()> {
        let index = self.commands.len();
        self.commands.push(command.clone());
        if self.fail_at == Some(index) {
            return Err(Error::ToolFailed {
                subcommand: command.subcommand().to_string(),
                status: "exit status: 1".to_string(),
            });
        }
        Ok(())
    }
}

/// Run commands in order, stopping at the first failure.
///
/// Commands that already ran are not rolled back. Returns how many
/// commands completed.
pub fn execute<R: CommandRunner + ?Sized>(commands: &[TfcCommand], runner: &mut R) -> Result<usize> {
    for (index, command) in commands.iter().enumerate() {
        tracing::info!(
            subcommand = command.subcommand(),
            step = index + 1,
            total = commands.len(),
            "running {}",
            command.display_masked()
        );
        if let Err(e) = runner.run(command) {
            tracing::error!(
                subcommand = command.subcommand(),
                skipped = commands.len() - index - 1,
                "tfc-cli failed: {}",
                e
            );
            return Err(e);
        }
    }
    Ok(commands.len())
}
