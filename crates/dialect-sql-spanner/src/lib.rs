//! # dialect-sql-spanner
//!
//! Spanner (PostgreSQL interface) profile for `dialect-sql-core`.
//!
//! # How Spanner differs from PostgreSQL
//!
//! - **Primary keys**: every table must have one. Tables mapped without a
//!   key get a hidden `rowid bigint` identity column backed by a
//!   [bit-reversed sequence].
//! - **Integers**: there is only `bigint`. Narrower integer columns are
//!   stored as `bigint` and bound as BIGINT.
//! - **Locking**: only `for update`, for reads as well. `nowait`,
//!   `skip locked` and lock timeouts are refused.
//! - **Schemas**: cannot be created or dropped, and `truncate` is a
//!   `delete`.
//! - **Queries**: no LATERAL, no `update ... from`, no recursive CTEs or
//!   CTEs on DML, no CTE materialization hints, no row-value comparisons,
//!   no `is distinct from`, no aggregate `filter`, no window
//!   `partition by`.
//! - **LIKE**: the backslash is the implicit escape character. Patterns
//!   without an explicit escape are re-escaped or emitted as is, depending
//!   on [`SpannerSettings::like_escape_policy`].
//! - **Errors**: integrity failures carry a gRPC status code and free text
//!   instead of an SQLSTATE; see [`classifier`].
//!
//! [bit-reversed sequence]: https://cloud.google.com/spanner/docs/primary-key-default-value
//!
//! ## Example
//!
//! ```rust
//! use dialect_sql_core::ast::{Expr, NamedTable, DeleteStatement, Statement};
//! use dialect_sql_core::Dialect;
//! use dialect_sql_spanner::SpannerPgDialect;
//!
//! let dialect = SpannerPgDialect::new();
//! let delete = DeleteStatement {
//!     with: None,
//!     target: NamedTable::new("users").alias("u"),
//!     where_clause: Some(Expr::qualified_column("u", "path").like(Expr::string("c:\\tmp%"))),
//! };
//! let out = dialect.translate(&Statement::Delete(delete)).unwrap();
//! assert_eq!(out.sql, "delete from users u where u.path like 'c:\\\\tmp%'");
//! assert!(dialect.for_update_skip_locked_string().is_err());
//! ```

mod aggregate;
pub mod classifier;
mod dialect;
mod exporter;
mod functions;
mod sequence;
pub mod settings;
mod translator;
pub mod zone_offset;

pub use aggregate::SpannerAggregateSupport;
pub use dialect::SpannerPgDialect;
pub use exporter::{ensure_primary_key, row_id_column, SpannerTableExporter, ROW_ID_COLUMN};
pub use functions::spanner_functions;
pub use sequence::SpannerSequenceSupport;
pub use settings::SpannerSettings;
pub use translator::SpannerTranslator;
