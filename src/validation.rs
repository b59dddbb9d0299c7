//! Cross-setting validation.
//!
//! Runs after resolution and before any command is assembled, so an
//! invalid combination of inputs never reaches `tfc-cli`. Only active
//! settings are checked, in registry order; the first violation wins.
//!
//! Checks per active setting:
//! 1. **Exclusion**: none of its `excludes` partners is active
//! 2. **Necessity**: all of its `requires` partners are active
//! 3. **Domain**: its value is one of the domain's allowed values

use crate::config::ResolvedSettings;
use crate::models::SettingSpec;
use crate::models::registry::Registry;
use crate::{Error, Result};

/// Whether the user asked for `spec` to take effect this run.
pub fn is_active(spec: &SettingSpec, settings: &ResolvedSettings) -> Result<bool> {
    settings.is_active(spec.name)
}

/// Validate every active setting in registry order.
pub fn validate_settings(registry: &Registry, settings: &ResolvedSettings) -> Result<()> {
    for spec in registry.iter() {
        validate_setting(spec, registry, settings)?;
    }
    Ok(())
}

/// Validate one setting against the rest of the resolved settings.
pub fn validate_setting(
    spec: &SettingSpec,
    registry: &Registry,
    settings: &ResolvedSettings,
) -> Result<()> {
    if !is_active(spec, settings)? {
        return Ok(());
    }

    for &name in spec.excludes {
        let other = registry.get(name)?;
        if is_active(other, settings)? {
            return Err(Error::MutualExclusion {
                setting: spec.name.to_string(),
                conflicting: other.name.to_string(),
            });
        }
    }

    for &name in spec.requires {
        let other = registry.get(name)?;
        if !is_active(other, settings)? {
            return Err(Error::MutualNecessity {
                group: requirement_group(spec),
                setting: spec.name.to_string(),
                missing: other.name.to_string(),
            });
        }
    }

    if let Some(domain) = &spec.domain {
        let value = settings.text(spec.name)?;
        if !domain.contains(value) {
            return Err(Error::DomainViolation {
                subcommand: spec.subcommand.unwrap_or_default().to_string(),
                flag: spec.flag.unwrap_or_default().to_string(),
                value: value.to_string(),
                allowed: domain.allowed().iter().map(|v| v.to_string()).collect(),
            });
        }
    }

    Ok(())
}

/// Label for a group of mutually necessary settings: the longest name
/// prefix they share (`setVCS` for `setVCSIdentifier`, `setVCSBranch`, ...).
fn requirement_group(spec: &SettingSpec) -> String {
    let mut prefix = spec.name;
    for other in spec.requires {
        let shared = prefix
            .char_indices()
            .zip(other.chars())
            .take_while(|((_, a), b)| a == b)
            .last()
            .map(|((i, c), _)| i + c.len_utf8())
            .unwrap_or(0);
        prefix = &prefix[..shared];
    }
    prefix.to_string()
}
