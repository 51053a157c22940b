//! Function registry of the Spanner dialect.

use dialect_sql_core::dialect::postgres_functions;
use dialect_sql_core::function::{Arity, FunctionDescriptor, FunctionRegistry};

/// PostgreSQL functions that Spanner does not implement.
const UNSUPPORTED: &[&str] = &[
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
    "json_objectagg",
    "json_array_append",
    "json_mergepatch",
    "xmlagg",
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
];

/// The PostgreSQL registry adjusted for Spanner.
#[must_use]
pub fn spanner_functions() -> FunctionRegistry {
    let mut registry = postgres_functions();

    registry.register(
        FunctionDescriptor::new("round")
            .pattern(Arity::Exact(1), "round(?1)")
            .pattern(Arity::Exact(2), "round(?1, ?2)"),
    );
    registry.register(FunctionDescriptor::template("length", 1, "length(?1)"));
    registry.register(FunctionDescriptor::template("character_length", 1, "length(?1)"));
    registry.register(FunctionDescriptor::template(
        "array_length",
        1,
        "array_length(?1, 1)",
    ));
    registry.register(FunctionDescriptor::template("position", 2, "strpos(?2, ?1)"));
    registry.register(FunctionDescriptor::template("locate", 2, "strpos(?2, ?1)"));

    registry.register(FunctionDescriptor::template("json_arrayagg", 1, "jsonb_agg(?1)").aggregate());
    registry.register(FunctionDescriptor::no_args("localtime", "current_timestamp"));
    registry.register(FunctionDescriptor::no_args("localtimestamp", "current_timestamp"));

    for name in UNSUPPORTED {
        registry.unregister(name);
    }
    registry
}
