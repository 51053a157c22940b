//! Construction-time settings of the Spanner dialect.

use serde::{Deserialize, Serialize};

use dialect_sql_core::config::{ConfigurationService, DatabaseVersion};
use dialect_sql_core::translate::LikeEscapePolicy;
use dialect_sql_core::{DialectError, Result};

/// Prefix shared by every Spanner setting.
pub const SETTINGS_PREFIX: &str = "dialect.spanner_pg";

/// Render TIME and TIMESTAMP columns as `timestamp with time zone`.
pub const USE_TIMESTAMPTZ_FOR_TIME_TYPE: &str = "dialect.spanner_pg.use_timestamptz_for_time_type";

/// How LIKE patterns without an explicit escape character are rendered.
pub const LIKE_ESCAPE_POLICY: &str = "dialect.spanner_pg.like_escape_policy";

/// Backend version, `major[.minor[.micro]]`.
pub const VERSION: &str = "dialect.spanner_pg.version";

/// Settings frozen into a [`SpannerPgDialect`](crate::SpannerPgDialect) when
/// it is built.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SpannerSettings {
    /// Store TIME and TIMESTAMP values as `timestamp with time zone`.
    pub use_timestamptz_for_time_type: bool,
    /// Escape handling of LIKE patterns without an escape character.
    pub like_escape_policy: LikeEscapePolicy,
    /// Backend version, when known.
    pub version: Option<DatabaseVersion>,
}

impl SpannerSettings {
    /// Reads the settings from a configuration lookup.
    ///
    /// Missing settings keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`DialectError::InvalidSetting`] for values that cannot be
    /// parsed.
    pub fn from_configuration<C: ConfigurationService>(config: &C) -> Result<Self> {
        let settings = Self {
            use_timestamptz_for_time_type: config
                .boolean_setting(USE_TIMESTAMPTZ_FOR_TIME_TYPE, false)?,
            like_escape_policy: config
                .parsed_setting(LIKE_ESCAPE_POLICY)?
                .unwrap_or_default(),
            version: config.parsed_setting(VERSION)?,
        };
        tracing::debug!(
            timestamptz = settings.use_timestamptz_for_time_type,
            like_escape_policy = %settings.like_escape_policy,
            "Loaded Spanner settings"
        );
        Ok(settings)
    }

    /// Parses the settings from a JSON object.
    ///
    /// # Errors
    ///
    /// Returns [`DialectError::InvalidSetting`] when the document does not
    /// describe valid settings.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| DialectError::InvalidSetting {
            name: SETTINGS_PREFIX.to_string(),
            value: e.to_string(),
        })
    }
}
