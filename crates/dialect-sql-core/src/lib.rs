//! # dialect-sql-core
//!
//! Backend-agnostic SQL pieces that backend profiles plug into.
//!
//! This crate provides:
//! - A statement AST (SELECT with CTEs, joins and lock clauses; INSERT;
//!   UPDATE with an auxiliary FROM list; DELETE) with a dedicated LIKE node
//! - An immutable capability descriptor ([`dialect::Capabilities`]) and the
//!   [`Dialect`] trait, whose defaults carry the PostgreSQL answers
//! - A translator pipeline ([`translate::SqlAstTranslator`]) whose hooks a
//!   backend can override one at a time
//! - A metadata model and table exporter for CREATE/DROP DDL
//! - Type templates, sequences, functions, aggregates, locking, and the
//!   classification of backend failures into constraint violations
//!
//! ## Rendering a statement
//!
//! ```rust
//! use dialect_sql_core::ast::{Expr, NamedTable, DeleteStatement, Statement};
//! use dialect_sql_core::{Dialect, PostgresDialect};
//!
//! let dialect = PostgresDialect::new();
//! let delete = DeleteStatement {
//!     with: None,
//!     target: NamedTable::new("users").alias("u"),
//!     where_clause: Some(Expr::qualified_column("u", "name").like(Expr::string("a%"))),
//! };
//! let out = dialect.translate(&Statement::Delete(delete)).unwrap();
//! assert_eq!(out.sql, "delete from users u where u.name like 'a%' escape ''");
//! assert_eq!(out.affected_tables[0].name, "users");
//! ```
//!
//! ## Capabilities
//!
//! ```rust
//! use dialect_sql_core::dialect::{Capabilities, Feature};
//!
//! let caps = Capabilities::postgres().with_overrides(&[(Feature::Lateral, false)]);
//! assert!(!caps.supports(Feature::Lateral));
//! assert!(caps.supports(Feature::FilterClause));
//! ```

pub mod aggregate;
pub mod ast;
pub mod config;
pub mod dialect;
pub mod error;
pub mod function;
pub mod lock;
pub mod schema;
pub mod sequence;
pub mod translate;
pub mod types;

pub use ast::{Expr, Statement};
pub use config::{ConfigurationService, DatabaseVersion};
pub use dialect::{Capabilities, Dialect, Feature, PostgresDialect};
pub use error::{BackendFailure, ConstraintKind, ConstraintViolation, DialectError, Result};
pub use translate::{SqlAstTranslator, StandardTranslator, TranslatedStatement};
pub use types::SqlTypeCode;
