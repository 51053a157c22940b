//! Named settings lookup used while a dialect is being constructed.
//!
//! Dialects read what they need once, at construction, into an immutable
//! settings value. Nothing reads configuration after that point.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{DialectError, Result};

/// A source of named string settings.
pub trait ConfigurationService {
    /// Returns the raw value of a setting, if present.
    fn setting(&self, name: &str) -> Option<String>;

    /// Reads a boolean setting, falling back to `default` when absent.
    ///
    /// # Errors
    ///
    /// Returns [`DialectError::InvalidSetting`] when the value is neither
    /// `true` nor `false` (case-insensitive).
    fn boolean_setting(&self, name: &str, default: bool) -> Result<bool> {
        match self.setting(name) {
            None => Ok(default),
            Some(raw) => match raw.trim().to_ascii_lowercase().as_str() {
                "true" => Ok(true),
                "false" => Ok(false),
                _ => Err(DialectError::InvalidSetting {
                    name: name.to_string(),
                    value: raw,
                }),
            },
        }
    }

    /// Reads a setting and parses it with [`FromStr`].
    ///
    /// # Errors
    ///
    /// Returns [`DialectError::InvalidSetting`] when parsing fails.
    fn parsed_setting<T: FromStr>(&self, name: &str) -> Result<Option<T>>
    where
        Self: Sized,
    {
        self.setting(name)
            .map(|raw| {
                raw.trim().parse().map_err(|_| DialectError::InvalidSetting {
                    name: name.to_string(),
                    value: raw.clone(),
                })
            })
            .transpose()
    }
}

impl ConfigurationService for HashMap<String, String> {
    fn setting(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

impl ConfigurationService for BTreeMap<String, String> {
    fn setting(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

impl ConfigurationService for serde_json::Map<String, serde_json::Value> {
    fn setting(&self, name: &str) -> Option<String> {
        match self.get(name)? {
            serde_json::Value::Null => None,
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}

/// A backend version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct DatabaseVersion {
    /// Major version.
    pub major: u32,
    /// Minor version.
    #[serde(default)]
    pub minor: u32,
    /// Micro version.
    #[serde(default)]
    pub micro: u32,
}

impl DatabaseVersion {
    /// The version every backend satisfies.
    pub const ZERO: Self = Self::new(0, 0, 0);

    /// Creates a version.
    #[must_use]
    pub const fn new(major: u32, minor: u32, micro: u32) -> Self {
        Self {
            major,
            minor,
            micro,
        }
    }

    /// Returns whether this version is at least `other`.
    #[must_use]
    pub fn is_same_or_after(&self, other: Self) -> bool {
        *self >= other
    }
}

impl fmt::Display for DatabaseVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.micro)
    }
}

impl FromStr for DatabaseVersion {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let mut parts = s.split('.').map(|p| {
            p.trim()
                .parse::<u32>()
                .map_err(|e| format!("invalid version component '{p}': {e}"))
        });
        let major = parts.next().ok_or_else(|| String::from("empty version"))??;
        let minor = parts.next().transpose()?.unwrap_or(0);
        let micro = parts.next().transpose()?.unwrap_or(0);
        if parts.next().is_some() {
            return Err(format!("too many version components in '{s}'"));
        }
        Ok(Self::new(major, minor, micro))
    }
}
