//! Command implementations for the action CLI.
//!
//! Each entry point runs the same pipeline up to the point it needs:
//! - `plan` - resolve, validate, and assemble, without executing
//! - `apply` - plan, then hand every command to a runner
//! - `settings` - describe the registry

use serde::Serialize;

use crate::Result;
use crate::config::{SettingsSource, resolve_settings};
use crate::models::SettingKind;
use crate::models::registry::Registry;
use crate::tfc::{CommandRunner, TfcCommand, assemble_commands, execute};
use crate::validation::validate_settings;

/// Command results that can be serialized to JSON or formatted for humans.
pub trait CommandResult {
    /// Serialize to JSON string.
    fn to_json(&self) -> String;

    /// Format for human-readable output.
    fn to_human(&self) -> String;
}

/// Resolve, validate, and assemble the commands for the given inputs.
///
/// Validation finishes before anything is assembled, so an error here
/// means no command was produced.
pub fn build_commands<S: SettingsSource + ?Sized>(
    source: &S,
    tool_path: &str,
) -> Result<Vec<TfcCommand>> {
    let registry = Registry::standard()?;
    let settings = resolve_settings(&registry, source)?;
    validate_settings(&registry, &settings)?;
    let commands = assemble_commands(&registry, &settings, tool_path)?;
    tracing::debug!(commands = commands.len(), "assembled tfc-cli commands");
    Ok(commands)
}

/// One planned or executed invocation, as reported to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedCommand {
    pub subcommand: String,
    pub argv: Vec<String>,
}

impl PlannedCommand {
    fn from_command(command: &TfcCommand, show_token: bool) -> Self {
        Self {
            subcommand: command.subcommand().to_string(),
            argv: if show_token {
                command.args().to_vec()
            } else {
                command.masked_args()
            },
        }
    }
}

fn argv_lines(commands: &[PlannedCommand]) -> String {
    commands
        .iter()
        .map(|c| format!("  {}", c.argv.join(" ")))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Result of `plan`.
#[derive(Debug, Clone, Serialize)]
pub struct PlanResult {
    pub commands: Vec<PlannedCommand>,
}

impl CommandResult for PlanResult {
    fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }

    fn to_human(&self) -> String {
        if self.commands.is_empty() {
            return "No workspace settings to change.".to_string();
        }
        format!(
            "{} tfc-cli command(s) planned:\n{}",
            self.commands.len(),
            argv_lines(&self.commands)
        )
    }
}

/// Assemble the commands without running them.
pub fn plan<S: SettingsSource + ?Sized>(
    source: &S,
    tool_path: &str,
    show_token: bool,
) -> Result<PlanResult> {
    let commands = build_commands(source, tool_path)?;
    Ok(PlanResult {
        commands: commands
            .iter()
            .map(|c| PlannedCommand::from_command(c, show_token))
            .collect(),
    })
}

/// Result of `apply`.
#[derive(Debug, Clone, Serialize)]
pub struct ApplyResult {
    pub dry_run: bool,
    pub applied: Vec<PlannedCommand>,
}

impl CommandResult for ApplyResult {
    fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }

    fn to_human(&self) -> String {
        if self.applied.is_empty() {
            return "No workspace settings to change.".to_string();
        }
        let verb = if self.dry_run { "Would run" } else { "Ran" };
        format!(
            "{} {} tfc-cli command(s):\n{}",
            verb,
            self.applied.len(),
            argv_lines(&self.applied)
        )
    }
}

/// Build the commands and run each one, stopping at the first failure.
pub fn apply<S, R>(source: &S, tool_path: &str, runner: &mut R, dry_run: bool) -> Result<ApplyResult>
where
    S: SettingsSource + ?Sized,
    R: CommandRunner + ?Sized,
{
    let commands = build_commands(source, tool_path)?;
    if dry_run {
        tracing::info!(commands = commands.len(), "dry run, not executing");
    } else {
        execute(&commands, runner)?;
    }
    Ok(ApplyResult {
        dry_run,
        applied: commands
            .iter()
            .map(|c| PlannedCommand::from_command(c, false))
            .collect(),
    })
}

/// One registry entry, as listed by `settings`.
#[derive(Debug, Clone, Serialize)]
pub struct SettingInfo {
    pub name: &'static str,
    pub kind: SettingKind,
    pub env_var: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subcommand: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flag: Option<&'static str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub excludes: Vec<&'static str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub requires: Vec<&'static str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub allowed_values: Vec<&'static str>,
}

/// Result of `settings`.
#[derive(Debug, Clone, Serialize)]
pub struct SettingsResult {
    pub settings: Vec<SettingInfo>,
}

impl CommandResult for SettingsResult {
    fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }

    fn to_human(&self) -> String {
        let mut lines = Vec::with_capacity(self.settings.len());
        for info in &self.settings {
            let mut line = format!(
                "{:<24} {:<6} {}",
                info.name,
                info.kind.as_str(),
                info.env_var
            );
            if let Some(sub) = info.subcommand {
                line.push_str(&format!("  -> {}", sub));
                if let Some(flag) = info.flag {
                    line.push_str(&format!(" {}", flag));
                }
            }
            if !info.allowed_values.is_empty() {
                line.push_str(&format!(" [{}]", info.allowed_values.join("|")));
            }
            if !info.excludes.is_empty() {
                line.push_str(&format!("  excludes: {}", info.excludes.join(", ")));
            }
            if !info.requires.is_empty() {
                line.push_str(&format!("  requires: {}", info.requires.join(", ")));
            }
            lines.push(line);
        }
        lines.join("\n")
    }
}

/// Describe every setting the action accepts.
pub fn settings() -> Result<SettingsResult> {
    let registry = Registry::standard()?;
    Ok(SettingsResult {
        settings: registry
            .iter()
            .map(|spec| SettingInfo {
                name: spec.name,
                kind: spec.kind,
                env_var: spec.env_var(),
                subcommand: spec.subcommand,
                flag: spec.flag,
                excludes: spec.excludes.to_vec(),
                requires: spec.requires.to_vec(),
                allowed_values: spec
                    .domain
                    .map(|d| d.allowed().to_vec())
                    .unwrap_or_default(),
            })
            .collect(),
    })
}
