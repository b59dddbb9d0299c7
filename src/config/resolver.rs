//! Raw value resolution.
//!
//! Every descriptor in the registry is read exactly once per run, in
//! registry order, producing a [`ResolvedSettings`] map that the rest of
//! the run only reads from.
//!
//! ## Rules
//!
//! - `input` settings must be present (an empty value is still a value)
//! - `set` settings default to the empty string, meaning "not specified"
//! - `unset` settings are parsed with [`parse_bool`]; a missing entry counts
//!   as `false`, and any present value outside the boolean spellings (the
//!   empty string included) fails the run

use std::collections::HashMap;

use super::SettingsSource;
use crate::models::registry::Registry;
use crate::models::{SettingKind, SettingSpec};
use crate::{Error, Result};

/// Spellings accepted as `true`, compared case-insensitively.
pub const TRUTHY: &[&str] = &["y", "yes", "t", "true", "on", "1"];
/// Spellings accepted as `false`, compared case-insensitively.
pub const FALSY: &[&str] = &["n", "no", "f", "false", "off", "0"];

/// Parse a loosely formatted boolean.
///
/// Matching ignores case but not whitespace. Returns `None` for anything
/// outside [`TRUTHY`] and [`FALSY`].
pub fn parse_bool(raw: &str) -> Option<bool> {
    let value = raw.to_lowercase();
    if TRUTHY.contains(&value.as_str()) {
        Some(true)
    } else if FALSY.contains(&value.as_str()) {
        Some(false)
    } else {
        None
    }
}

/// Mask a secret for display, keeping only enough to recognize it.
///
/// Secrets of 8 characters or fewer are hidden entirely.
pub fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 8 {
        "...".to_string()
    } else if chars.len() <= 12 {
        let head: String = chars.iter().take(4).collect();
        format!("{}...", head)
    } else {
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{}...{}", head, tail)
    }
}

/// A setting's value after resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedValue {
    /// Value of an `input` or `set` setting
    Text(String),
    /// Value of an `unset` toggle
    Toggle(bool),
}

impl ResolvedValue {
    /// Whether the value means the user wants the setting applied.
    pub fn is_active(&self) -> bool {
        match self {
            ResolvedValue::Text(value) => !value.is_empty(),
            ResolvedValue::Toggle(on) => *on,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ResolvedValue::Text(value) => Some(value),
            ResolvedValue::Toggle(_) => None,
        }
    }
}

/// Resolved values keyed by setting name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedSettings {
    values: HashMap<&'static str, ResolvedValue>,
}

impl ResolvedSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, setting: &'static str, value: ResolvedValue) {
        self.values.insert(setting, value);
    }

    /// Value for a setting. Fails with `NotFound` if it was never resolved.
    pub fn get(&self, setting: &str) -> Result<&ResolvedValue> {
        self.values
            .get(setting)
            .ok_or_else(|| Error::NotFound(setting.to_string()))
    }

    /// Text value for a setting; toggles have none.
    pub fn text(&self, setting: &str) -> Result<&str> {
        self.get(setting)?
            .as_text()
            .ok_or_else(|| Error::NotFound(format!("{} (not a text setting)", setting)))
    }

    pub fn is_active(&self, setting: &str) -> Result<bool> {
        Ok(self.get(setting)?.is_active())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Read and interpret the raw value for one setting.
pub fn resolve_value<S: SettingsSource + ?Sized>(
    spec: &SettingSpec,
    source: &S,
) -> Result<ResolvedValue> {
    let raw = source.get(&spec.env_var());
    match spec.kind {
        SettingKind::Input => raw
            .map(ResolvedValue::Text)
            .ok_or_else(|| Error::MissingRequiredInput(spec.name.to_string())),
        SettingKind::Set => Ok(ResolvedValue::Text(raw.unwrap_or_default())),
        SettingKind::Unset => match raw {
            None => Ok(ResolvedValue::Toggle(false)),
            Some(value) => parse_bool(&value).map(ResolvedValue::Toggle).ok_or_else(|| {
                Error::UnparsableBoolean {
                    setting: spec.name.to_string(),
                    value,
                }
            }),
        },
    }
}

/// Resolve every setting in the registry, stopping at the first failure.
pub fn resolve_settings<S: SettingsSource + ?Sized>(
    registry: &Registry,
    source: &S,
) -> Result<ResolvedSettings> {
    let mut settings = ResolvedSettings::new();
    for spec in registry.iter() {
        let value = resolve_value(spec, source)?;
        tracing::debug!(
            setting = spec.name,
            kind = %spec.kind,
            active = value.is_active(),
            "resolved setting"
        );
        settings.insert(spec.name, value);
    }
    tracing::debug!(count = settings.len(), "resolved all settings");
    Ok(settings)
}
