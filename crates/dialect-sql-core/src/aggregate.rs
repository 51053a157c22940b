//! Access to components of aggregate (JSON or struct) columns.

use crate::error::{DialectError, Result};
use crate::types::SqlTypeCode;

/// Reads and writes individual components of an aggregate column.
///
/// The defaults follow PostgreSQL: JSON components are extracted with the
/// `->`/`->>` operators and struct components with `(parent).field`.
pub trait AggregateSupport: Send + Sync {
    /// Expression reading `column` out of the aggregate `parent`.
    ///
    /// `template` contains `placeholder`, which is replaced by the component
    /// access expression.
    ///
    /// # Errors
    ///
    /// Returns [`DialectError::IllegalArgument`] for unsupported aggregate
    /// column types.
    fn component_read_expression(
        &self,
        template: &str,
        placeholder: &str,
        parent: &str,
        column: &str,
        aggregate_type: SqlTypeCode,
    ) -> Result<String> {
        let access = match aggregate_type {
            SqlTypeCode::Json | SqlTypeCode::JsonArray => format!("{parent}->>'{column}'"),
            SqlTypeCode::Struct => format!("({parent}).{column}"),
            other => return Err(unsupported_aggregate(other)),
        };
        Ok(template.replace(placeholder, &access))
    }

    /// Expression assigning `column` inside the aggregate `parent`.
    ///
    /// # Errors
    ///
    /// Returns [`DialectError::IllegalArgument`] for unsupported aggregate
    /// column types.
    fn component_assignment_expression(
        &self,
        parent: &str,
        column: &str,
        aggregate_type: SqlTypeCode,
    ) -> Result<String> {
        match aggregate_type {
            SqlTypeCode::Json | SqlTypeCode::JsonArray => Ok(parent.to_string()),
            SqlTypeCode::Struct => Ok(format!("{parent}.{column}")),
            other => Err(unsupported_aggregate(other)),
        }
    }

    /// Whether writes to the aggregate need a custom write expression.
    fn requires_custom_write_expression(&self, aggregate_type: SqlTypeCode) -> bool {
        matches!(aggregate_type, SqlTypeCode::Json | SqlTypeCode::Struct)
    }

    /// Expression writing the listed components into the aggregate column.
    ///
    /// # Errors
    ///
    /// Returns [`DialectError::IllegalArgument`] when the aggregate type has
    /// no custom write expression.
    fn custom_write_expression(
        &self,
        aggregate_column: &str,
        aggregate_type: SqlTypeCode,
        components: &[&str],
    ) -> Result<String> {
        if aggregate_type != SqlTypeCode::Json {
            return Err(unsupported_aggregate(aggregate_type));
        }
        let mut expr = format!("coalesce({aggregate_column},'{{}}')");
        for component in components {
            expr = format!("jsonb_set({expr},'{{{component}}}',to_jsonb(?))");
        }
        Ok(expr)
    }
}

/// Error for an aggregate column type the dialect cannot handle.
#[must_use]
pub fn unsupported_aggregate(aggregate_type: SqlTypeCode) -> DialectError {
    DialectError::IllegalArgument(format!("Unsupported aggregate SQL type: {aggregate_type}"))
}

/// PostgreSQL aggregate support.
#[derive(Debug, Default, Clone, Copy)]
pub struct PostgresAggregateSupport;

impl AggregateSupport for PostgresAggregateSupport {}
