//! Index settings.
//!
//! Settings are a flat map of dotted keys to string values, e.g.
//! `index.cache.filter.type = none`. They can be built in code or loaded from
//! an INI file, where section names become key prefixes:
//!
//! ```ini
//! [index.cache]
//! filter.type = simple
//! query.parser.resident.max_size = 250
//! ```
//!
//! is equivalent to the keys `index.cache.filter.type` and
//! `index.cache.query.parser.resident.max_size`.

use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

use ini::Ini;
use thiserror::Error;

/// Errors that can occur while loading or reading settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// Failed to read a settings file.
    #[error("Failed to read settings from {path}: {reason}")]
    Read { path: String, reason: String },

    /// Settings text could not be parsed.
    #[error("Failed to parse settings: {0}")]
    Parse(String),

    /// A key holds a value that is not valid for it.
    #[error("Invalid value '{value}' for setting '{key}': {reason}")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },
}

/// Flat key/value settings for one index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexSettings {
    values: BTreeMap<String, String>,
}

impl IndexSettings {
    /// Create empty settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a setting.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Parse settings from INI text.
    pub fn from_ini_str(text: &str) -> Result<Self, SettingsError> {
        let ini = Ini::load_from_str(text).map_err(|e| SettingsError::Parse(e.to_string()))?;
        Ok(Self::from_ini(&ini))
    }

    /// Load settings from an INI file.
    pub fn from_ini_file(path: &Path) -> Result<Self, SettingsError> {
        let ini = Ini::load_from_file(path).map_err(|e| SettingsError::Read {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self::from_ini(&ini))
    }

    fn from_ini(ini: &Ini) -> Self {
        let mut values = BTreeMap::new();
        for (section, properties) in ini.iter() {
            for (key, value) in properties.iter() {
                let full_key = match section {
                    Some(section) => format!("{}.{}", section, key),
                    None => key.to_string(),
                };
                values.insert(full_key, value.trim().to_string());
            }
        }
        Self { values }
    }

    /// Raw value of `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Raw value of `key`, or `default` when unset.
    pub fn get_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get(key).unwrap_or(default)
    }

    /// Value of `key` parsed as an unsigned integer.
    pub fn get_u64(&self, key: &str) -> Result<Option<u64>, SettingsError> {
        self.get(key)
            .map(|raw| {
                raw.parse::<u64>()
                    .map_err(|e| invalid(key, raw, &e.to_string()))
            })
            .transpose()
    }

    /// Value of `key` parsed as a number of seconds.
    pub fn get_duration_secs(&self, key: &str) -> Result<Option<Duration>, SettingsError> {
        Ok(self.get_u64(key)?.map(Duration::from_secs))
    }

    /// Number of settings.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no settings are present.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over all settings in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Build an [`SettingsError::InvalidValue`].
pub(crate) fn invalid(key: &str, value: &str, reason: &str) -> SettingsError {
    SettingsError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
