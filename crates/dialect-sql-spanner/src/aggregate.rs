//! Aggregate column support.
//!
//! Spanner has no composite types, so only JSON documents and arrays can
//! hold aggregate components.

use dialect_sql_core::aggregate::{unsupported_aggregate, AggregateSupport};
use dialect_sql_core::{Result, SqlTypeCode};

/// JSON-only aggregate support.
#[derive(Debug, Default, Clone, Copy)]
pub struct SpannerAggregateSupport;

const fn is_json(aggregate_type: SqlTypeCode) -> bool {
    matches!(aggregate_type, SqlTypeCode::Json | SqlTypeCode::JsonArray)
}

impl AggregateSupport for SpannerAggregateSupport {
    fn component_read_expression(
        &self,
        template: &str,
        placeholder: &str,
        parent: &str,
        column: &str,
        aggregate_type: SqlTypeCode,
    ) -> Result<String> {
        if !is_json(aggregate_type) {
            return Err(unsupported_aggregate(aggregate_type));
        }
        Ok(template.replace(placeholder, &format!("{parent}->>'{column}'")))
    }

    fn component_assignment_expression(
        &self,
        parent: &str,
        _column: &str,
        aggregate_type: SqlTypeCode,
    ) -> Result<String> {
        if !is_json(aggregate_type) {
            return Err(unsupported_aggregate(aggregate_type));
        }
        Ok(parent.to_string())
    }

    fn requires_custom_write_expression(&self, aggregate_type: SqlTypeCode) -> bool {
        aggregate_type == SqlTypeCode::Json
    }
}
