//! SQL type codes, DDL type templates and JDBC-style type descriptors.
//!
//! A dialect answers two separate questions about a type code:
//!
//! - the *storage* type, i.e. the DDL text used in `CREATE TABLE`
//!   ([`crate::dialect::Dialect::column_type`]), and
//! - the *binding* type, i.e. the type code values are read and written
//!   with ([`crate::dialect::Dialect::jdbc_type`]).
//!
//! Both must agree: a column stored as `bigint` has to be bound as
//! [`SqlTypeCode::BigInt`], otherwise values do not round-trip.

use core::fmt;

/// Backend-agnostic SQL type codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SqlTypeCode {
    /// Boolean.
    Boolean,
    /// 8-bit integer.
    TinyInt,
    /// 16-bit integer.
    SmallInt,
    /// 32-bit integer.
    Integer,
    /// 64-bit integer.
    BigInt,
    /// Float with binary precision.
    Float,
    /// 4-byte float.
    Real,
    /// 8-byte float.
    Double,
    /// Exact numeric.
    Numeric,
    /// Exact decimal.
    Decimal,
    /// Fixed-length character string.
    Char,
    /// Variable-length character string.
    Varchar,
    /// Long character string.
    LongVarchar,
    /// Character large object.
    Clob,
    /// National character large object.
    NClob,
    /// Fixed-length binary.
    Binary,
    /// Variable-length binary.
    Varbinary,
    /// Binary large object.
    Blob,
    /// Date.
    Date,
    /// Time of day.
    Time,
    /// Timestamp without time zone.
    Timestamp,
    /// Timestamp normalized to UTC.
    TimestampUtc,
    /// Timestamp with time zone.
    TimestampWithTimeZone,
    /// UUID.
    Uuid,
    /// JSON document.
    Json,
    /// JSON array.
    JsonArray,
    /// Structured (user-defined) type.
    Struct,
    /// XML document.
    Xml,
}

impl SqlTypeCode {
    /// Returns the upper-case name of the type code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Boolean => "BOOLEAN",
            Self::TinyInt => "TINYINT",
            Self::SmallInt => "SMALLINT",
            Self::Integer => "INTEGER",
            Self::BigInt => "BIGINT",
            Self::Float => "FLOAT",
            Self::Real => "REAL",
            Self::Double => "DOUBLE",
            Self::Numeric => "NUMERIC",
            Self::Decimal => "DECIMAL",
            Self::Char => "CHAR",
            Self::Varchar => "VARCHAR",
            Self::LongVarchar => "LONGVARCHAR",
            Self::Clob => "CLOB",
            Self::NClob => "NCLOB",
            Self::Binary => "BINARY",
            Self::Varbinary => "VARBINARY",
            Self::Blob => "BLOB",
            Self::Date => "DATE",
            Self::Time => "TIME",
            Self::Timestamp => "TIMESTAMP",
            Self::TimestampUtc => "TIMESTAMP_UTC",
            Self::TimestampWithTimeZone => "TIMESTAMP_WITH_TIMEZONE",
            Self::Uuid => "UUID",
            Self::Json => "JSON",
            Self::JsonArray => "JSON_ARRAY",
            Self::Struct => "STRUCT",
            Self::Xml => "SQLXML",
        }
    }

    /// Returns whether this is one of the integer type codes.
    #[must_use]
    pub const fn is_integral(self) -> bool {
        matches!(
            self,
            Self::TinyInt | Self::SmallInt | Self::Integer | Self::BigInt
        )
    }
}

impl fmt::Display for SqlTypeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Length, precision and scale of a column or cast target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Size {
    /// Character or byte length.
    pub length: Option<u32>,
    /// Numeric precision (decimal digits, or bits for `FLOAT`).
    pub precision: Option<u32>,
    /// Numeric scale.
    pub scale: Option<u32>,
}

impl Size {
    /// A size carrying only a length.
    #[must_use]
    pub const fn length(length: u32) -> Self {
        Self {
            length: Some(length),
            precision: None,
            scale: None,
        }
    }

    /// A size carrying precision and scale.
    #[must_use]
    pub const fn precision(precision: u32, scale: u32) -> Self {
        Self {
            length: None,
            precision: Some(precision),
            scale: Some(scale),
        }
    }
}

/// Default length used when a `$l` placeholder has no explicit length.
pub const DEFAULT_LENGTH: u32 = 255;
/// Default precision used when a `$p` placeholder has no explicit precision.
pub const DEFAULT_PRECISION: u32 = 38;
/// Default scale used when a `$s` placeholder has no explicit scale.
pub const DEFAULT_SCALE: u32 = 2;

/// Expands the `$l`, `$p` and `$s` placeholders of a DDL type template.
///
/// ```rust
/// use dialect_sql_core::types::{expand_type_template, Size};
///
/// assert_eq!(expand_type_template("varchar($l)", Size::length(64)), "varchar(64)");
/// assert_eq!(expand_type_template("numeric($p,$s)", Size::precision(10, 2)), "numeric(10,2)");
/// ```
#[must_use]
pub fn expand_type_template(template: &str, size: Size) -> String {
    template
        .replace("$l", &size.length.unwrap_or(DEFAULT_LENGTH).to_string())
        .replace("$p", &size.precision.unwrap_or(DEFAULT_PRECISION).to_string())
        .replace("$s", &size.scale.unwrap_or(DEFAULT_SCALE).to_string())
}

/// A DDL type whose rendered name depends on the requested capacity.
///
/// The first capacity bound that is greater than or equal to the requested
/// capacity wins; past every bound the fallback template is used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapacityDependentDdlType {
    bounds: Vec<(u32, &'static str)>,
    fallback: &'static str,
}

impl CapacityDependentDdlType {
    /// Creates a capacity-dependent type with the given fallback template.
    #[must_use]
    pub const fn new(fallback: &'static str) -> Self {
        Self {
            bounds: Vec::new(),
            fallback,
        }
    }

    /// Adds a template used up to (and including) `capacity`.
    #[must_use]
    pub fn with_capacity(mut self, capacity: u32, template: &'static str) -> Self {
        self.bounds.push((capacity, template));
        self.bounds.sort_by_key(|(bound, _)| *bound);
        self
    }

    /// Picks the template for `capacity`.
    #[must_use]
    pub fn template_for(&self, capacity: Option<u32>) -> &'static str {
        let Some(capacity) = capacity else {
            return self.fallback;
        };
        self.bounds
            .iter()
            .find(|(bound, _)| capacity <= *bound)
            .map_or(self.fallback, |(_, template)| template)
    }
}

/// Describes how values of a type code are bound and read back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JdbcTypeDescriptor {
    /// The type code reported for the column.
    pub type_code: SqlTypeCode,
    /// The type code values are actually bound and read with.
    pub binding_type: SqlTypeCode,
}

impl JdbcTypeDescriptor {
    /// A descriptor that binds values with their own type code.
    #[must_use]
    pub const fn identity(type_code: SqlTypeCode) -> Self {
        Self {
            type_code,
            binding_type: type_code,
        }
    }

    /// A descriptor that reports `type_code` but binds as `binding_type`.
    #[must_use]
    pub const fn widened(type_code: SqlTypeCode, binding_type: SqlTypeCode) -> Self {
        Self {
            type_code,
            binding_type,
        }
    }
}

/// A SQL data type reference, e.g. the target of a `CAST`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataType {
    /// The type code.
    pub code: SqlTypeCode,
    /// Length, precision and scale.
    pub size: Size,
}

impl DataType {
    /// A data type with default size.
    #[must_use]
    pub const fn new(code: SqlTypeCode) -> Self {
        Self {
            code,
            size: Size {
                length: None,
                precision: None,
                scale: None,
            },
        }
    }

    /// A data type with an explicit size.
    #[must_use]
    pub const fn sized(code: SqlTypeCode, size: Size) -> Self {
        Self { code, size }
    }
}
