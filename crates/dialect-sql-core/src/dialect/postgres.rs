//! PostgreSQL dialect.

use super::{Capabilities, Dialect};
use crate::function::{Arity, FunctionDescriptor, FunctionRegistry};
use crate::translate::{SqlAstTranslator, StandardTranslator};
use crate::types::SqlTypeCode;

/// The PostgreSQL dialect, the base profile of every PostgreSQL-compatible
/// backend.
#[derive(Debug, Clone)]
pub struct PostgresDialect {
    capabilities: Capabilities,
    functions: FunctionRegistry,
}

impl PostgresDialect {
    /// Creates a new PostgreSQL dialect.
    #[must_use]
    pub fn new() -> Self {
        Self {
            capabilities: Capabilities::postgres(),
            functions: postgres_functions(),
        }
    }
}

impl Default for PostgresDialect {
    fn default() -> Self {
        Self::new()
    }
}

impl Dialect for PostgresDialect {
    fn name(&self) -> &'static str {
        "postgresql"
    }

    fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    fn function_registry(&self) -> &FunctionRegistry {
        &self.functions
    }

    fn translator(&self) -> Box<dyn SqlAstTranslator + '_> {
        Box::new(StandardTranslator::new(self))
    }
}

/// PostgreSQL DDL templates.
pub(crate) const fn column_type(code: SqlTypeCode) -> &'static str {
    match code {
        SqlTypeCode::Boolean => "boolean",
        SqlTypeCode::TinyInt | SqlTypeCode::SmallInt => "smallint",
        SqlTypeCode::Integer => "integer",
        SqlTypeCode::BigInt => "bigint",
        SqlTypeCode::Float => "float($p)",
        SqlTypeCode::Real => "real",
        SqlTypeCode::Double => "float(53)",
        SqlTypeCode::Numeric | SqlTypeCode::Decimal => "numeric($p,$s)",
        SqlTypeCode::Char => "char($l)",
        SqlTypeCode::Varchar => "varchar($l)",
        SqlTypeCode::LongVarchar | SqlTypeCode::Clob | SqlTypeCode::NClob => "text",
        SqlTypeCode::Binary | SqlTypeCode::Varbinary | SqlTypeCode::Blob => "bytea",
        SqlTypeCode::Date => "date",
        SqlTypeCode::Time => "time",
        SqlTypeCode::Timestamp => "timestamp",
        SqlTypeCode::TimestampUtc | SqlTypeCode::TimestampWithTimeZone => {
            "timestamp with time zone"
        }
        SqlTypeCode::Uuid => "uuid",
        SqlTypeCode::Json | SqlTypeCode::JsonArray => "jsonb",
        SqlTypeCode::Struct => "record",
        SqlTypeCode::Xml => "xml",
    }
}

/// The functions PostgreSQL offers to queries.
#[must_use]
pub fn postgres_functions() -> FunctionRegistry {
    let mut registry = FunctionRegistry::new();

    for name in ["count", "sum", "avg", "min", "max", "string_agg", "array_agg"] {
        registry.register(FunctionDescriptor::named_aggregate(name));
    }
    registry.register(FunctionDescriptor::named_aggregate("json_arrayagg"));
    registry.register(FunctionDescriptor::named_aggregate("json_objectagg"));
    registry.register(FunctionDescriptor::named_aggregate("xmlagg"));

    for name in [
        "lower", "upper", "trim", "coalesce", "nullif", "abs", "mod", "sqrt", "ceil", "floor",
        "concat", "replace", "substr", "left", "right", "lpad", "rpad", "greatest", "least",
        "trunc", "sign", "exp", "ln", "power",
    ] {
        registry.register(FunctionDescriptor::named(name));
    }
    registry.register(
        FunctionDescriptor::new("round")
            .pattern(Arity::Exact(1), "round(?1)")
            .pattern(Arity::Exact(2), "round(?1, ?2)"),
    );
    registry.register(FunctionDescriptor::template("length", 1, "length(?1)"));
    registry.register(FunctionDescriptor::template(
        "character_length",
        1,
        "character_length(?1)",
    ));
    registry.register(FunctionDescriptor::template("position", 2, "position(?1 in ?2)"));
    registry.register(FunctionDescriptor::template("locate", 2, "position(?1 in ?2)"));
    registry.register(FunctionDescriptor::template("array_length", 1, "cardinality(?1)"));

    for name in [
        "array_append",
        "array_fill",
        "array_fill_list",
        "array_trim",
        "array_set",
        "array_replace",
        "array_remove",
        "array_remove_index",
        "array_prepend",
        "array_position",
        "array_positions",
        "json_query",
        "json_table",
        "json_value",
        "json_exists",
        "json_object",
        "json_array_append",
        "json_mergepatch",
        "xmlelement",
        "xmlcomment",
        "xmlforest",
        "xmlconcat",
        "xmlpi",
        "xmlquery_postgresql",
        "xmlexists",
        "xmlquery",
        "xmltable",
        "generate_series",
    ] {
        registry.register(FunctionDescriptor::named(name));
    }

    registry.register(FunctionDescriptor::no_args("current_date", "current_date"));
    registry.register(FunctionDescriptor::no_args("current_time", "current_time"));
    registry.register(FunctionDescriptor::no_args(
        "current_timestamp",
        "current_timestamp",
    ));
    registry.register(FunctionDescriptor::no_args("localtime", "localtime"));
    registry.register(FunctionDescriptor::no_args("localtimestamp", "localtimestamp"));

    registry
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::Feature;
    use crate::lock::LockTimeout;
    use crate::types::Size;

    #[test]
    fn test_postgres_dialect() {
        let dialect = PostgresDialect::new();
        assert_eq!(dialect.name(), "postgresql");
        assert_eq!(dialect.identifier_quote(), '"');
        assert_eq!(dialect.parameter_placeholder(), "?");
        assert!(dialect.supports(Feature::Lateral));
        assert!(!dialect.supports(Feature::RefCursor));
    }

    #[test]
    fn test_column_types() {
        let dialect = PostgresDialect::new();
        assert_eq!(
            dialect.ddl_type(SqlTypeCode::Varchar, Size::length(64)),
            "varchar(64)"
        );
        assert_eq!(
            dialect.ddl_type(SqlTypeCode::Varchar, Size::length(20_000_000)),
            "text"
        );
        assert_eq!(
            dialect.ddl_type(SqlTypeCode::Numeric, Size::precision(10, 2)),
            "numeric(10,2)"
        );
        assert_eq!(dialect.array_type_name("integer"), "integer[]");
    }

    #[test]
    fn test_lock_strings() {
        let dialect = PostgresDialect::new();
        assert_eq!(
            dialect.write_lock_string(LockTimeout::WaitForever).unwrap(),
            " for update"
        );
        assert_eq!(
            dialect.write_lock_string(LockTimeout::NoWait).unwrap(),
            " for update nowait"
        );
        assert_eq!(
            dialect.read_lock_string(LockTimeout::SkipLocked).unwrap(),
            " for share skip locked"
        );
        assert_eq!(
            dialect.for_update_skip_locked_string().unwrap(),
            " for update skip locked"
        );
    }

    #[test]
    fn test_schema_commands() {
        let dialect = PostgresDialect::new();
        assert_eq!(
            dialect.create_schema_command("app").unwrap(),
            vec!["create schema app".to_string()]
        );
        assert_eq!(dialect.truncate_table_statement("t"), "truncate table t");
        assert_eq!(dialect.row_id(), Some("ctid"));
    }

    #[test]
    fn test_function_registry() {
        let registry = postgres_functions();
        assert!(registry.find("count").is_some_and(|f| f.is_aggregate()));
        assert_eq!(
            registry
                .render("position", &["'a'".to_string(), "s".to_string()])
                .unwrap(),
            "position('a' in s)"
        );
        assert_eq!(registry.render("localtime", &[]).unwrap(), "localtime");
    }
}
