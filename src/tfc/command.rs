//! `tfc-cli` command generation.
//!
//! This module provides a builder for `tfc-cli workspaces` argument vectors
//! and the grouping pass that turns validated settings into one command per
//! subcommand. It does not execute anything; see [`super::execute`].

use std::collections::BTreeMap;

use crate::Result;
use crate::config::{ResolvedSettings, mask_secret};
use crate::models::registry::{ORG_SETTING, Registry, TOKEN_SETTING, WORKSPACE_SETTING};
use crate::models::{SettingKind, SettingSpec, ValueDomain};

/// Default location of the `tfc-cli` binary inside the action container.
pub const DEFAULT_TOOL_PATH: &str = "/tfc-cli";

/// Command group every invocation runs under.
pub const WORKSPACES: &str = "workspaces";

const TOKEN_FLAG: &str = "-token";

/// Connection inputs shared by every invocation of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceTarget<'a> {
    pub token: &'a str,
    pub org: &'a str,
    pub workspace: &'a str,
}

impl<'a> WorkspaceTarget<'a> {
    /// Read the shared inputs from resolved settings.
    pub fn from_settings(settings: &'a ResolvedSettings) -> Result<Self> {
        Ok(Self {
            token: settings.text(TOKEN_SETTING)?,
            org: settings.text(ORG_SETTING)?,
            workspace: settings.text(WORKSPACE_SETTING)?,
        })
    }
}

/// Builder for one `tfc-cli workspaces <subcommand>` argument vector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TfcCommand {
    subcommand: String,
    args: Vec<String>,
}

impl TfcCommand {
    /// Start a command: program, `workspaces`, then the subcommand.
    ///
    /// # Example
    /// ```
    /// use tfc_workspace_action::tfc::command::TfcCommand;
    /// let cmd = TfcCommand::new("/tfc-cli", "set-description");
    /// assert_eq!(cmd.args(), ["/tfc-cli", "workspaces", "set-description"]);
    /// ```
    pub fn new(tool_path: &str, subcommand: &str) -> Self {
        Self {
            subcommand: subcommand.to_string(),
            args: vec![
                tool_path.to_string(),
                WORKSPACES.to_string(),
                subcommand.to_string(),
            ],
        }
    }

    /// Start a command addressed at a workspace.
    ///
    /// Shared inputs always follow the subcommand in the same order:
    /// `-token`, `-org`, `-workspace`.
    ///
    /// # Example
    /// ```
    /// use tfc_workspace_action::tfc::command::{TfcCommand, WorkspaceTarget};
    /// let target = WorkspaceTarget { token: "tok", org: "acme", workspace: "prod" };
    /// let cmd = TfcCommand::for_workspace("/tfc-cli", "unset-description", &target);
    /// assert_eq!(
    ///     cmd.to_string(),
    ///     "/tfc-cli workspaces unset-description -token tok -org acme -workspace prod"
    /// );
    /// ```
    pub fn for_workspace(tool_path: &str, subcommand: &str, target: &WorkspaceTarget<'_>) -> Self {
        Self::new(tool_path, subcommand)
            .flag_with_value(TOKEN_FLAG, target.token)
            .flag_with_value("-org", target.org)
            .flag_with_value("-workspace", target.workspace)
    }

    /// Add a flag with a value as two arguments.
    pub fn flag_with_value(mut self, flag: &str, value: &str) -> Self {
        self.args.push(flag.to_string());
        self.args.push(value.to_string());
        self
    }

    /// Add a single argument.
    pub fn arg(mut self, arg: &str) -> Self {
        self.args.push(arg.to_string());
        self
    }

    /// Add the arguments one setting contributes.
    ///
    /// - `set` with a boolean domain: one `flag=true|false` argument
    /// - `set` otherwise: the flag and the raw value
    /// - `unset` and `input`: nothing
    pub fn setting(self, spec: &SettingSpec, value: &str) -> Self {
        match (spec.kind, spec.flag) {
            (SettingKind::Set, Some(flag)) => match spec.domain {
                Some(ValueDomain::Boolean { transform, .. }) => {
                    self.arg(&format!("{}={}", flag, transform(value)))
                }
                _ => self.flag_with_value(flag, value),
            },
            _ => self,
        }
    }

    pub fn subcommand(&self) -> &str {
        &self.subcommand
    }

    /// Program to execute (the first argument).
    pub fn program(&self) -> &str {
        &self.args[0]
    }

    /// The full argument vector, program included.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn into_args(self) -> Vec<String> {
        self.args
    }

    /// The argument vector with the value after `-token` masked.
    pub fn masked_args(&self) -> Vec<String> {
        let mut masked = Vec::with_capacity(self.args.len());
        let mut hide_next = false;
        for arg in &self.args {
            if hide_next {
                masked.push(mask_secret(arg));
            } else {
                masked.push(arg.clone());
            }
            hide_next = arg == TOKEN_FLAG;
        }
        masked
    }

    /// Space-joined, token-masked form for logs.
    pub fn display_masked(&self) -> String {
        self.masked_args().join(" ")
    }
}

impl std::fmt::Display for TfcCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.args.join(" "))
    }
}

/// Build one command per subcommand that has at least one active setting.
///
/// Commands come out sorted by subcommand name. Within a command, settings
/// contribute their arguments in registry order. No active settings means
/// no commands.
pub fn assemble_commands(
    registry: &Registry,
    settings: &ResolvedSettings,
    tool_path: &str,
) -> Result<Vec<TfcCommand>> {
    let mut groups: BTreeMap<&str, Vec<&SettingSpec>> = BTreeMap::new();
    for spec in registry.iter() {
        let Some(subcommand) = spec.subcommand else {
            continue;
        };
        if settings.is_active(spec.name)? {
            groups.entry(subcommand).or_default().push(spec);
        }
    }

    if groups.is_empty() {
        return Ok(Vec::new());
    }

    let target = WorkspaceTarget::from_settings(settings)?;
    let mut commands = Vec::with_capacity(groups.len());
    for (subcommand, specs) in groups {
        let mut cmd = TfcCommand::for_workspace(tool_path, subcommand, &target);
        for spec in specs {
            if let Some(value) = settings.get(spec.name)?.as_text() {
                cmd = cmd.setting(spec, value);
            }
        }
        commands.push(cmd);
    }
    Ok(commands)
}
