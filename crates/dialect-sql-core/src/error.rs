//! Error types for dialect negotiation, rendering and schema export.

/// Errors raised while asking a dialect for SQL text.
///
/// None of these are transient: they signal a programming or schema-design
/// mistake, so callers are expected to propagate them rather than retry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DialectError {
    /// The backend cannot express the requested SQL feature.
    #[error("{dialect} does not support {feature}")]
    UnsupportedCapability {
        /// Name of the dialect that refused the request.
        dialect: String,
        /// Human readable name of the feature.
        feature: String,
    },

    /// The relational model cannot be mapped onto the backend.
    #[error("Mapping error: {0}")]
    Mapping(String),

    /// An argument is outside of what the dialect accepts.
    #[error("Illegal argument: {0}")]
    IllegalArgument(String),

    /// A function is not registered with the dialect.
    #[error("Unknown function: {0}")]
    UnknownFunction(String),

    /// A configuration setting holds a value that cannot be parsed.
    #[error("Invalid value '{value}' for setting '{name}'")]
    InvalidSetting {
        /// Setting name.
        name: String,
        /// Offending value.
        value: String,
    },
}

impl DialectError {
    /// Builds an [`DialectError::UnsupportedCapability`] and logs the refusal.
    #[must_use]
    pub fn unsupported(dialect: &str, feature: impl Into<String>) -> Self {
        let feature = feature.into();
        tracing::warn!(dialect, feature = %feature, "Unsupported capability requested");
        Self::UnsupportedCapability {
            dialect: dialect.to_string(),
            feature,
        }
    }
}

/// Result type for dialect operations.
pub type Result<T> = std::result::Result<T, DialectError>;

/// The kind of integrity constraint a backend failure violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstraintKind {
    /// Duplicate key or "already exists".
    Unique,
    /// CHECK constraint.
    Check,
    /// NOT NULL column.
    NotNull,
    /// Foreign key constraint.
    ForeignKey,
    /// A constraint violation whose kind could not be determined.
    Unknown,
}

impl ConstraintKind {
    /// Returns a stable lowercase name for logs and diagnostics.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unique => "unique",
            Self::Check => "check",
            Self::NotNull => "not_null",
            Self::ForeignKey => "foreign_key",
            Self::Unknown => "unknown",
        }
    }
}

/// A raw failure reported by the backend after a statement was executed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BackendFailure {
    /// Vendor error code (0 when the driver reports none).
    pub error_code: i32,
    /// SQLSTATE, when the driver reports one.
    pub sql_state: Option<String>,
    /// Free-text message.
    pub message: Option<String>,
    /// The SQL that failed.
    pub sql: Option<String>,
}

impl BackendFailure {
    /// Creates a failure from a vendor code and message.
    #[must_use]
    pub fn new(error_code: i32, message: impl Into<String>) -> Self {
        Self {
            error_code,
            sql_state: None,
            message: Some(message.into()),
            sql: None,
        }
    }

    /// Attaches the SQLSTATE.
    #[must_use]
    pub fn with_sql_state(mut self, sql_state: impl Into<String>) -> Self {
        self.sql_state = Some(sql_state.into());
        self
    }

    /// Attaches the SQL that failed.
    #[must_use]
    pub fn with_sql(mut self, sql: impl Into<String>) -> Self {
        self.sql = Some(sql.into());
        self
    }

    /// Returns the message, or an empty string when there is none.
    #[must_use]
    pub fn message_or_empty(&self) -> &str {
        self.message.as_deref().unwrap_or_default()
    }
}

/// A backend failure classified as an integrity-constraint violation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ConstraintViolation {
    /// Which kind of constraint was violated.
    pub kind: ConstraintKind,
    /// The backend message, verbatim.
    pub message: String,
    /// The vendor error code.
    pub error_code: i32,
    /// The SQL that failed, when known.
    pub sql: Option<String>,
}

impl ConstraintViolation {
    /// Classifies `failure` as a violation of `kind`.
    #[must_use]
    pub fn from_failure(kind: ConstraintKind, failure: &BackendFailure) -> Self {
        Self {
            kind,
            message: failure.message_or_empty().to_string(),
            error_code: failure.error_code,
            sql: failure.sql.clone(),
        }
    }
}
