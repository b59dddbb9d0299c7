//! Data models for workspace setting descriptors.
//!
//! This module defines the core data structures:
//! - `SettingKind` - How a setting's raw value is read and what it means
//! - `ValueDomain` - Optional constraint (and mapping) on accepted raw values
//! - `SettingSpec` - One user-facing setting and its relationships
//!
//! The descriptor table itself lives in [`registry`].

pub mod registry;

use serde::Serialize;
use std::fmt;

use crate::config::env_var_name;

/// How a setting is read from the environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SettingKind {
    /// Shared connection input (token, organization, workspace). Required.
    Input,
    /// A value handed to a `set-*` subcommand. Empty means not specified.
    Set,
    /// A boolean toggle selecting an `unset-*` subcommand.
    Unset,
}

impl SettingKind {
    /// Convert to string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            SettingKind::Input => "input",
            SettingKind::Set => "set",
            SettingKind::Unset => "unset",
        }
    }
}

impl fmt::Display for SettingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Legal raw values for a setting.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ValueDomain {
    /// The raw value must be one of `allowed` and is passed through unchanged.
    OneOf { allowed: &'static [&'static str] },
    /// The raw value must be one of `allowed` and is mapped to a boolean,
    /// which the tool receives joined to the flag (`-flag=true`).
    Boolean {
        allowed: &'static [&'static str],
        #[serde(skip_serializing)]
        transform: fn(&str) -> bool,
    },
}

impl ValueDomain {
    /// Raw values accepted by this domain.
    pub fn allowed(&self) -> &'static [&'static str] {
        match self {
            ValueDomain::OneOf { allowed } | ValueDomain::Boolean { allowed, .. } => *allowed,
        }
    }

    pub fn contains(&self, value: &str) -> bool {
        self.allowed().contains(&value)
    }
}

/// A static record describing one configurable setting.
///
/// Descriptors are plain data: built with the `const` constructors below and
/// collected into the table in [`registry`].
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SettingSpec {
    /// Name the action user knows (e.g., "setDescription")
    pub name: &'static str,

    pub kind: SettingKind,

    /// `tfc-cli workspaces` subcommand this setting selects
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subcommand: Option<&'static str>,

    /// Flag carrying the value (only for `set` settings)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flag: Option<&'static str>,

    /// Settings that may not be active together with this one
    #[serde(skip_serializing_if = "no_names")]
    pub excludes: &'static [&'static str],

    /// Settings that must be active whenever this one is
    #[serde(skip_serializing_if = "no_names")]
    pub requires: &'static [&'static str],

    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<ValueDomain>,
}

impl SettingSpec {
    /// A shared input consumed by every invocation.
    pub const fn input(name: &'static str) -> Self {
        Self {
            name,
            kind: SettingKind::Input,
            subcommand: None,
            flag: None,
            excludes: &[],
            requires: &[],
            domain: None,
        }
    }

    /// A value passed to `subcommand` as `flag <value>`.
    pub const fn set(name: &'static str, subcommand: &'static str, flag: &'static str) -> Self {
        Self {
            name,
            kind: SettingKind::Set,
            subcommand: Some(subcommand),
            flag: Some(flag),
            excludes: &[],
            requires: &[],
            domain: None,
        }
    }

    /// A toggle whose activation alone selects `subcommand`.
    pub const fn unset(name: &'static str, subcommand: &'static str) -> Self {
        Self {
            name,
            kind: SettingKind::Unset,
            subcommand: Some(subcommand),
            flag: None,
            excludes: &[],
            requires: &[],
            domain: None,
        }
    }

    pub const fn excludes(mut self, names: &'static [&'static str]) -> Self {
        self.excludes = names;
        self
    }

    pub const fn requires(mut self, names: &'static [&'static str]) -> Self {
        self.requires = names;
        self
    }

    pub const fn domain(mut self, domain: ValueDomain) -> Self {
        self.domain = Some(domain);
        self
    }

    /// Environment variable the CI runner exposes this setting under.
    pub fn env_var(&self) -> String {
        env_var_name(self.name)
    }

    /// Whether this setting feeds every invocation instead of selecting one.
    pub fn is_input(&self) -> bool {
        self.kind == SettingKind::Input
    }
}

fn no_names(names: &&'static [&'static str]) -> bool {
    names.is_empty()
}
