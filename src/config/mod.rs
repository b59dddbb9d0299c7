//! Where setting values come from.
//!
//! A CI runner hands action inputs over as environment variables named
//! `INPUT_<NAME>`, where `<NAME>` is the setting name uppercased:
//!
//! - `setDescription` is read from `INPUT_SETDESCRIPTION`
//! - `setVCSOAuthTokenID` is read from `INPUT_SETVCSOAUTHTOKENID`
//!
//! All reads go through [`SettingsSource`], so resolution can run against
//! the real process environment ([`EnvSource`]) or an in-memory map
//! ([`MapSource`]) without touching global state.
//!
//! Use the [`resolver`] module to turn raw values into resolved settings.

pub mod resolver;

use std::collections::HashMap;

pub use resolver::{ResolvedSettings, ResolvedValue, mask_secret, parse_bool, resolve_settings};

/// Prefix the CI runner puts in front of every action input.
pub const INPUT_PREFIX: &str = "INPUT_";

/// Environment variable name for a setting.
pub fn env_var_name(setting: &str) -> String {
    format!("{}{}", INPUT_PREFIX, setting.to_uppercase())
}

/// A read-only mapping from variable name to raw value.
pub trait SettingsSource {
    /// Raw value for `key`, or `None` when it is absent.
    fn get(&self, key: &str) -> Option<String>;
}

/// Reads from the process environment.
///
/// Values that are not valid Unicode are treated as absent.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvSource;

impl SettingsSource for EnvSource {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// Reads from an owned map. Used by tests and by callers that already
/// hold the inputs in memory.
#[derive(Debug, Clone, Default)]
pub struct MapSource {
    values: HashMap<String, String>,
}

impl MapSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a raw variable (e.g., `INPUT_ORGNAME`).
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Set the variable for a setting by its name (e.g., `orgName`).
    pub fn with_setting(self, setting: &str, value: impl Into<String>) -> Self {
        self.with(env_var_name(setting), value)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.values.remove(key)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MapSource {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl SettingsSource for MapSource {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
}

impl<S: SettingsSource + ?Sized> SettingsSource for &S {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }
}
