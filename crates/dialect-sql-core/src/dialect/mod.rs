//! SQL dialect support.
//!
//! A [`Dialect`] is a read-only description of a backend: which features it
//! supports, how types are stored and bound, how locks, sequences and
//! schema objects are spelled, how backend failures are classified, and
//! which translator renders statements for it. Every answer is fixed once
//! the dialect is constructed.

mod capabilities;
mod postgres;

pub use capabilities::{Capabilities, Feature};
pub use postgres::{postgres_functions, PostgresDialect};

use crate::aggregate::AggregateSupport;
use crate::ast::Statement;
use crate::config::DatabaseVersion;
use crate::error::{BackendFailure, ConstraintKind, ConstraintViolation, DialectError, Result};
use crate::function::FunctionRegistry;
use crate::lock::{ConnectionLockTimeoutStrategy, LockTimeout, LockingSupport};
use crate::schema::{TableExporter, UniqueDelegate};
use crate::sequence::SequenceSupport;
use crate::translate::{SqlAstTranslator, TranslatedStatement};
use crate::types::{expand_type_template, DataType, JdbcTypeDescriptor, Size, SqlTypeCode};

/// How a temporary table used by multi-table mutations is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemporaryTableStrategy {
    /// A session-local temporary table.
    Local,
    /// A global temporary table.
    Global,
    /// A regular table with a session discriminator column.
    Persistent,
}

/// How UPDATE/DELETE statements spanning several tables are executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationStrategy {
    /// Stage identifiers in a CTE.
    Cte,
    /// Stage identifiers in a local temporary table.
    LocalTemporaryTable,
    /// Stage identifiers in a global temporary table.
    GlobalTemporaryTable,
    /// Stage identifiers in a persistent table.
    PersistentTable,
}

/// Trait for SQL dialect-specific behavior.
///
/// Only [`Dialect::name`], [`Dialect::capabilities`],
/// [`Dialect::function_registry`] and [`Dialect::translator`] are required;
/// every other answer defaults to PostgreSQL.
pub trait Dialect: Send + Sync {
    /// Returns the name of the dialect.
    fn name(&self) -> &'static str;

    /// Returns the capability flags of the backend.
    fn capabilities(&self) -> &Capabilities;

    /// Returns whether the backend supports `feature`.
    fn supports(&self, feature: Feature) -> bool {
        self.capabilities().supports(feature)
    }

    /// Fails with [`DialectError::UnsupportedCapability`] unless `feature` is
    /// supported.
    ///
    /// # Errors
    ///
    /// Returns an error when the backend lacks `feature`.
    fn require(&self, feature: Feature) -> Result<()> {
        if self.supports(feature) {
            Ok(())
        } else {
            Err(DialectError::unsupported(self.name(), feature.as_str()))
        }
    }

    /// The backend version this dialect instance targets.
    fn version(&self) -> DatabaseVersion {
        self.minimum_supported_version()
    }

    /// The oldest backend version the dialect accepts.
    fn minimum_supported_version(&self) -> DatabaseVersion {
        DatabaseVersion::new(12, 0, 0)
    }

    // Quoting and literals

    /// Returns the identifier quote character.
    fn identifier_quote(&self) -> char {
        '"'
    }

    /// Quotes an identifier.
    fn quote_identifier(&self, name: &str) -> String {
        let quote = self.identifier_quote();
        format!("{quote}{name}{quote}")
    }

    /// Renders a string literal, doubling embedded single quotes.
    fn quote_string(&self, value: &str) -> String {
        format!("'{}'", value.replace('\'', "''"))
    }

    /// Returns the parameter placeholder.
    fn parameter_placeholder(&self) -> &'static str {
        "?"
    }

    /// Keyword of the case-insensitive LIKE operator.
    fn case_insensitive_like(&self) -> &'static str {
        "ilike"
    }

    // Types

    /// DDL template for `code`, with `$l`, `$p` and `$s` placeholders.
    fn column_type(&self, code: SqlTypeCode) -> String {
        postgres::column_type(code).to_string()
    }

    /// DDL text for `code` at the given size.
    fn ddl_type(&self, code: SqlTypeCode, size: Size) -> String {
        let code = match code {
            SqlTypeCode::Varchar | SqlTypeCode::Char
                if size
                    .length
                    .is_some_and(|l| l > self.max_varchar_length()) =>
            {
                SqlTypeCode::LongVarchar
            }
            other => other,
        };
        expand_type_template(&self.column_type(code), size)
    }

    /// Type text used as the target of `cast`.
    fn cast_type(&self, data_type: &DataType) -> String {
        self.ddl_type(data_type.code, data_type.size)
    }

    /// Binding descriptor for `code`.
    fn jdbc_type(&self, code: SqlTypeCode) -> JdbcTypeDescriptor {
        JdbcTypeDescriptor::identity(code)
    }

    /// Maps a type reported by the driver for a result column back to a
    /// type code.
    fn resolve_type_code(&self, reported: SqlTypeCode, column_type_name: &str) -> SqlTypeCode {
        let _ = column_type_name;
        reported
    }

    /// Name of the array type holding `element_type_name` values.
    fn array_type_name(&self, element_type_name: &str) -> String {
        format!("{element_type_name}[]")
    }

    /// Largest length of a `varchar` column.
    fn max_varchar_length(&self) -> u32 {
        10_485_760
    }

    /// Largest length of a binary column.
    fn max_varbinary_length(&self) -> u32 {
        1_073_741_823
    }

    /// Function returning the current timestamp.
    fn current_timestamp(&self) -> &'static str {
        "current_timestamp"
    }

    /// Function returning the current time.
    fn current_time(&self) -> &'static str {
        "current_time"
    }

    // Locking

    /// Locking capabilities of the backend.
    fn locking_support(&self) -> LockingSupport {
        LockingSupport::postgres()
    }

    /// Clause appended to acquire a write lock.
    fn for_update_string(&self) -> &'static str {
        " for update"
    }

    /// Clause appended to acquire a read lock.
    fn for_share_string(&self) -> &'static str {
        " for share"
    }

    /// Write lock clause honoring `timeout`.
    ///
    /// # Errors
    ///
    /// Returns an error when the backend cannot express `timeout`.
    fn write_lock_string(&self, timeout: LockTimeout) -> Result<String> {
        with_lock_timeout(self, self.for_update_string(), timeout)
    }

    /// Read lock clause honoring `timeout`.
    ///
    /// # Errors
    ///
    /// Returns an error when the backend cannot express `timeout`.
    fn read_lock_string(&self, timeout: LockTimeout) -> Result<String> {
        with_lock_timeout(self, self.for_share_string(), timeout)
    }

    /// `for update nowait`.
    ///
    /// # Errors
    ///
    /// Returns an error when the backend cannot skip waiting.
    fn for_update_nowait_string(&self) -> Result<String> {
        self.require(Feature::NoWait)?;
        Ok(format!("{} nowait", self.for_update_string()))
    }

    /// `for update skip locked`.
    ///
    /// # Errors
    ///
    /// Returns an error when the backend cannot skip locked rows.
    fn for_update_skip_locked_string(&self) -> Result<String> {
        self.require(Feature::SkipLocked)?;
        Ok(format!("{} skip locked", self.for_update_string()))
    }

    // Schema management

    /// Statements creating a schema.
    ///
    /// # Errors
    ///
    /// Returns an error when the backend cannot manage schemas.
    fn create_schema_command(&self, schema_name: &str) -> Result<Vec<String>> {
        self.require(Feature::CreateSchema)?;
        Ok(vec![format!("create schema {schema_name}")])
    }

    /// Statements dropping a schema.
    ///
    /// # Errors
    ///
    /// Returns an error when the backend cannot manage schemas.
    fn drop_schema_command(&self, schema_name: &str) -> Result<Vec<String>> {
        self.require(Feature::CreateSchema)?;
        Ok(vec![format!("drop schema if exists {schema_name} cascade")])
    }

    /// Query returning the current schema, empty when unavailable.
    fn current_schema_command(&self) -> &'static str {
        "select current_schema()"
    }

    /// Statement removing every row of `table_name`.
    fn truncate_table_statement(&self, table_name: &str) -> String {
        format!("truncate table {table_name}")
    }

    /// Suffix of `drop table` that also drops dependent objects.
    fn cascade_constraints_string(&self) -> &'static str {
        " cascade"
    }

    /// Statement to run before dropping tables, if any.
    fn before_drop_statement(&self) -> Option<String> {
        None
    }

    /// Name of the physical row identifier pseudo-column, if any.
    fn row_id(&self) -> Option<&'static str> {
        Some("ctid")
    }

    /// Column definition suffix of an identity column.
    fn identity_column_string(&self) -> &'static str {
        "generated by default as identity"
    }

    /// Fragment following `alter table <t>` that adds a foreign key.
    ///
    /// An empty `primary_key` references the primary key of
    /// `referenced_table`.
    fn add_foreign_key_constraint_string(
        &self,
        constraint_name: &str,
        foreign_key: &[String],
        referenced_table: &str,
        primary_key: &[String],
    ) -> String {
        let mut sql = format!(
            " add constraint {constraint_name} foreign key ({}) references {referenced_table}",
            foreign_key.join(", ")
        );
        if !primary_key.is_empty() {
            sql.push_str(&format!(" ({})", primary_key.join(", ")));
        }
        sql
    }

    /// How unique constraints are exported.
    fn unique_delegate(&self) -> UniqueDelegate {
        UniqueDelegate::AlterTableConstraint
    }

    /// Exporter producing table DDL.
    fn table_exporter(&self) -> &dyn TableExporter {
        &crate::schema::StandardTableExporter
    }

    /// Sequence syntax.
    fn sequence_support(&self) -> &dyn SequenceSupport {
        &crate::sequence::PostgresSequenceSupport
    }

    /// Access to components of aggregate columns.
    fn aggregate_support(&self) -> &dyn AggregateSupport {
        &crate::aggregate::PostgresAggregateSupport
    }

    /// Functions available to queries.
    fn function_registry(&self) -> &FunctionRegistry;

    // Multi-table mutations

    /// Local temporary table strategy, if supported.
    fn local_temporary_table_strategy(&self) -> Option<TemporaryTableStrategy> {
        Some(TemporaryTableStrategy::Local)
    }

    /// Global temporary table strategy, if supported.
    fn global_temporary_table_strategy(&self) -> Option<TemporaryTableStrategy> {
        None
    }

    /// Persistent table strategy, if supported.
    fn persistent_temporary_table_strategy(&self) -> Option<TemporaryTableStrategy> {
        Some(TemporaryTableStrategy::Persistent)
    }

    /// Strategy for multi-table UPDATE and DELETE.
    fn fallback_mutation_strategy(&self) -> MutationStrategy {
        MutationStrategy::Cte
    }

    /// Strategy for multi-table INSERT.
    fn fallback_insert_strategy(&self) -> MutationStrategy {
        MutationStrategy::Cte
    }

    // Failures

    /// Classifies a backend failure as a constraint violation.
    ///
    /// Returns `None` when the failure is not recognized.
    fn classify_failure(&self, failure: &BackendFailure) -> Option<ConstraintViolation> {
        classify_by_sql_state(failure)
    }

    // Rendering

    /// A fresh translator for this dialect.
    fn translator(&self) -> Box<dyn SqlAstTranslator + '_>;

    /// Renders `statement` with a fresh translator.
    ///
    /// # Errors
    ///
    /// Returns an error when the statement uses a feature the backend lacks.
    fn translate(&self, statement: &Statement) -> Result<TranslatedStatement> {
        self.translator().translate(statement)
    }
}

fn with_lock_timeout<D: Dialect + ?Sized>(
    dialect: &D,
    lock_string: &str,
    timeout: LockTimeout,
) -> Result<String> {
    match timeout {
        LockTimeout::WaitForever => Ok(lock_string.to_string()),
        LockTimeout::NoWait => {
            dialect.require(Feature::NoWait)?;
            Ok(format!("{lock_string} nowait"))
        }
        LockTimeout::SkipLocked => {
            dialect.require(Feature::SkipLocked)?;
            Ok(format!("{lock_string} skip locked"))
        }
        // Real timeouts go on the connection, never into the clause.
        LockTimeout::After(_)
            if dialect.locking_support().connection_timeout
                == ConnectionLockTimeoutStrategy::Query =>
        {
            Ok(lock_string.to_string())
        }
        LockTimeout::After(_) => Err(DialectError::unsupported(dialect.name(), "lock timeout")),
    }
}

/// Classifies a failure by its SQLSTATE (class `23`).
#[must_use]
pub fn classify_by_sql_state(failure: &BackendFailure) -> Option<ConstraintViolation> {
    let state = failure.sql_state.as_deref()?;
    let kind = match state {
        "23505" => ConstraintKind::Unique,
        "23502" => ConstraintKind::NotNull,
        "23503" => ConstraintKind::ForeignKey,
        "23514" => ConstraintKind::Check,
        other if other.starts_with("23") => ConstraintKind::Unknown,
        _ => return None,
    };
    Some(ConstraintViolation::from_failure(kind, failure))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sql_state_classification() {
        let failure = BackendFailure::new(0, "duplicate key").with_sql_state("23505");
        assert_eq!(
            classify_by_sql_state(&failure).map(|v| v.kind),
            Some(ConstraintKind::Unique)
        );
        let failure = BackendFailure::new(0, "other").with_sql_state("23001");
        assert_eq!(
            classify_by_sql_state(&failure).map(|v| v.kind),
            Some(ConstraintKind::Unknown)
        );
        let failure = BackendFailure::new(0, "syntax").with_sql_state("42601");
        assert!(classify_by_sql_state(&failure).is_none());
        assert!(classify_by_sql_state(&BackendFailure::new(6, "x")).is_none());
    }
}
