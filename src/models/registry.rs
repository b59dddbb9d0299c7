//! The workspace setting registry.
//!
//! [`WORKSPACE_SETTINGS`] is the schema of the action: every input it
//! accepts, the `tfc-cli workspaces` subcommand and flag each maps to, and
//! which settings exclude or require one another. [`Registry`] wraps a table
//! after checking it for authoring mistakes, so the rest of the engine can
//! trust every name it looks up.

use std::collections::HashSet;

use super::{SettingKind, SettingSpec, ValueDomain};
use crate::{Error, Result};

/// Setting holding the Terraform Cloud API token.
pub const TOKEN_SETTING: &str = "tfcToken";
/// Setting holding the organization name.
pub const ORG_SETTING: &str = "orgName";
/// Setting holding the workspace name.
pub const WORKSPACE_SETTING: &str = "workspaceName";

const UNSET_VCS: &[&str] = &["unsetVCSIdentifier", "unsetVCSBranch", "unsetVCSOAuthTokenID"];
const SET_VCS: &[&str] = &["setVCSIdentifier", "setVCSBranch", "setVCSOAuthTokenID"];

fn apply_method_is_auto(value: &str) -> bool {
    value == "auto"
}

/// Every setting the action understands, in declaration order.
///
/// Declaration order is also the order flags appear within one invocation.
pub static WORKSPACE_SETTINGS: &[SettingSpec] = &[
    SettingSpec::input(TOKEN_SETTING),
    SettingSpec::input(ORG_SETTING),
    SettingSpec::input(WORKSPACE_SETTING),
    SettingSpec::set("setDescription", "set-description", "-description")
        .excludes(&["unsetDescription"]),
    SettingSpec::unset("unsetDescription", "unset-description").excludes(&["setDescription"]),
    SettingSpec::set("setApplyMethod", "set-auto-apply", "-auto-apply").domain(
        ValueDomain::Boolean {
            allowed: &["auto", "manual"],
            transform: apply_method_is_auto,
        },
    ),
    SettingSpec::set(
        "setWorkingDirectory",
        "set-working-directory",
        "-working-directory",
    )
    .excludes(&["unsetWorkingDirectory"]),
    SettingSpec::unset("unsetWorkingDirectory", "unset-working-directory")
        .excludes(&["setWorkingDirectory"]),
    SettingSpec::set("setVCSIdentifier", "set-vcs-branch", "-identifier")
        .excludes(UNSET_VCS)
        .requires(&["setVCSBranch", "setVCSOAuthTokenID"]),
    SettingSpec::set("setVCSBranch", "set-vcs-branch", "-branch")
        .excludes(UNSET_VCS)
        .requires(&["setVCSIdentifier", "setVCSOAuthTokenID"]),
    SettingSpec::set("setVCSOAuthTokenID", "set-vcs-branch", "-oauth-token-id")
        .excludes(UNSET_VCS)
        .requires(&["setVCSIdentifier", "setVCSBranch"]),
    SettingSpec::unset("unsetVCSIdentifier", "unset-vcs-branch")
        .excludes(SET_VCS)
        .requires(&["unsetVCSBranch", "unsetVCSOAuthTokenID"]),
    SettingSpec::unset("unsetVCSBranch", "unset-vcs-branch")
        .excludes(SET_VCS)
        .requires(&["unsetVCSIdentifier", "unsetVCSOAuthTokenID"]),
    SettingSpec::unset("unsetVCSOAuthTokenID", "unset-vcs-branch")
        .excludes(SET_VCS)
        .requires(&["unsetVCSIdentifier", "unsetVCSBranch"]),
];

/// An ordered, checked collection of setting descriptors.
#[derive(Debug, Clone)]
pub struct Registry {
    specs: Vec<SettingSpec>,
}

impl Registry {
    /// Build a registry, rejecting tables with inconsistent declarations.
    ///
    /// Relations are checked in both directions here so validation can
    /// safely look at each descriptor's own declarations only.
    pub fn new(specs: impl Into<Vec<SettingSpec>>) -> Result<Self> {
        let registry = Self {
            specs: specs.into(),
        };
        registry.check()?;
        Ok(registry)
    }

    /// The action's registry, built from [`WORKSPACE_SETTINGS`].
    pub fn standard() -> Result<Self> {
        Self::new(WORKSPACE_SETTINGS)
    }

    /// Look up a descriptor by name.
    pub fn get(&self, name: &str) -> Result<&SettingSpec> {
        self.specs
            .iter()
            .find(|spec| spec.name == name)
            .ok_or_else(|| Error::NotFound(name.to_string()))
    }

    /// Descriptors in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &SettingSpec> {
        self.specs.iter()
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    fn check(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for spec in &self.specs {
            if !seen.insert(spec.name) {
                return Err(invalid(format!("duplicate setting '{}'", spec.name)));
            }
        }

        for spec in &self.specs {
            self.check_shape(spec)?;
            for &other in spec.excludes {
                let partner = self.related(spec, other, "excludes")?;
                if !partner.excludes.contains(&spec.name) {
                    return Err(invalid(format!(
                        "'{}' excludes '{}' but not the other way around",
                        spec.name, other
                    )));
                }
            }
            for &other in spec.requires {
                let partner = self.related(spec, other, "requires")?;
                if !partner.requires.contains(&spec.name) {
                    return Err(invalid(format!(
                        "'{}' requires '{}' but not the other way around",
                        spec.name, other
                    )));
                }
            }
        }
        Ok(())
    }

    fn check_shape(&self, spec: &SettingSpec) -> Result<()> {
        let problem = match spec.kind {
            SettingKind::Input => {
                if spec.subcommand.is_some() || spec.flag.is_some() {
                    Some("an input setting cannot target a subcommand or flag")
                } else if !spec.excludes.is_empty() || !spec.requires.is_empty() {
                    Some("an input setting cannot declare relations")
                } else if spec.domain.is_some() {
                    Some("an input setting cannot declare a value domain")
                } else {
                    None
                }
            }
            SettingKind::Set => {
                if spec.subcommand.is_none() || spec.flag.is_none() {
                    Some("a set setting needs both a subcommand and a flag")
                } else {
                    None
                }
            }
            SettingKind::Unset => {
                if spec.subcommand.is_none() {
                    Some("an unset setting needs a subcommand")
                } else if spec.flag.is_some() {
                    Some("an unset setting cannot carry a flag")
                } else if spec.domain.is_some() {
                    Some("an unset setting cannot declare a value domain")
                } else {
                    None
                }
            }
        };

        match problem {
            Some(problem) => Err(invalid(format!("'{}': {}", spec.name, problem))),
            None => Ok(()),
        }
    }

    fn related(&self, spec: &SettingSpec, other: &str, relation: &str) -> Result<&SettingSpec> {
        if other == spec.name {
            return Err(invalid(format!("'{}' {} itself", spec.name, relation)));
        }
        self.get(other).map_err(|_| {
            invalid(format!(
                "'{}' {} unknown setting '{}'",
                spec.name, relation, other
            ))
        })
    }
}

fn invalid(message: String) -> Error {
    Error::InvalidRegistry(message)
}
