//! The Spanner PostgreSQL-interface dialect.

use dialect_sql_core::aggregate::AggregateSupport;
use dialect_sql_core::config::{ConfigurationService, DatabaseVersion};
use dialect_sql_core::dialect::{
    Capabilities, Feature, MutationStrategy, PostgresDialect, TemporaryTableStrategy,
};
use dialect_sql_core::function::FunctionRegistry;
use dialect_sql_core::lock::{LockTimeout, LockingSupport};
use dialect_sql_core::schema::{TableExporter, UniqueDelegate};
use dialect_sql_core::sequence::SequenceSupport;
use dialect_sql_core::translate::SqlAstTranslator;
use dialect_sql_core::types::{
    expand_type_template, CapacityDependentDdlType, JdbcTypeDescriptor, Size,
};
use dialect_sql_core::{
    BackendFailure, ConstraintViolation, Dialect, DialectError, Result, SqlTypeCode,
};

use crate::aggregate::SpannerAggregateSupport;
use crate::classifier;
use crate::exporter::SpannerTableExporter;
use crate::functions::spanner_functions;
use crate::sequence::SpannerSequenceSupport;
use crate::settings::SpannerSettings;
use crate::translator::SpannerTranslator;

const TIMESTAMP_WITH_TIME_ZONE: &str = "timestamp with time zone";

/// Features PostgreSQL has and Spanner lacks.
const SPANNER_OVERRIDES: &[(Feature, bool)] = &[
    (Feature::NoWait, false),
    (Feature::SkipLocked, false),
    (Feature::UserDefinedTypes, false),
    (Feature::FilterClause, false),
    (Feature::RecursiveCycleUsingClause, false),
    (Feature::RecursiveSearchClause, false),
    (Feature::UniqueConstraintInColumnDefinition, false),
    (Feature::RowValueConstructorGtLtSyntax, false),
    (Feature::RowValueConstructorSyntaxInQuantifiedPredicates, false),
    (Feature::RowValueConstructorSyntaxInInSubquery, false),
    (Feature::CaseInsensitiveLike, false),
    (Feature::Lateral, false),
    (Feature::FromClauseInUpdate, false),
    (Feature::RowConstructor, false),
    (Feature::IfExistsBeforeConstraintName, false),
    (Feature::IfExistsAfterAlterTable, false),
    (Feature::DistinctFromPredicate, false),
    (Feature::PartitionBy, false),
    (Feature::NonQueryWithCte, false),
    (Feature::RecursiveCte, false),
    (Feature::CreateSchema, false),
    (Feature::BatchTruncate, false),
    (Feature::RefCursor, false),
    (Feature::MaterializationHint, false),
];

/// Spanner through its PostgreSQL interface.
///
/// Built from the PostgreSQL profile with Spanner's overrides on top. The
/// settings are fixed at construction.
#[derive(Debug, Clone)]
pub struct SpannerPgDialect {
    base: PostgresDialect,
    capabilities: Capabilities,
    functions: FunctionRegistry,
    settings: SpannerSettings,
}

impl SpannerPgDialect {
    /// Creates the dialect with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::with_settings(SpannerSettings::default())
    }

    /// Creates the dialect with the given settings.
    #[must_use]
    pub fn with_settings(settings: SpannerSettings) -> Self {
        let base = PostgresDialect::new();
        let capabilities = base.capabilities().with_overrides(SPANNER_OVERRIDES);
        Self {
            base,
            capabilities,
            functions: spanner_functions(),
            settings,
        }
    }

    /// Creates the dialect from configuration settings.
    ///
    /// # Errors
    ///
    /// Returns [`DialectError::InvalidSetting`] for unparsable settings.
    pub fn from_configuration<C: ConfigurationService>(config: &C) -> Result<Self> {
        SpannerSettings::from_configuration(config).map(Self::with_settings)
    }

    /// The settings the dialect was built with.
    #[must_use]
    pub const fn settings(&self) -> &SpannerSettings {
        &self.settings
    }

    fn check_lock_timeout(&self, timeout: LockTimeout) -> Result<()> {
        match timeout {
            LockTimeout::WaitForever => Ok(()),
            LockTimeout::After(_) => Err(DialectError::unsupported(self.name(), "lock timeout")),
            LockTimeout::NoWait => self.require(Feature::NoWait),
            LockTimeout::SkipLocked => self.require(Feature::SkipLocked),
        }
    }
}

impl Default for SpannerPgDialect {
    fn default() -> Self {
        Self::new()
    }
}

impl Dialect for SpannerPgDialect {
    fn name(&self) -> &'static str {
        "spanner_postgresql"
    }

    fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    fn version(&self) -> DatabaseVersion {
        self.settings
            .version
            .unwrap_or_else(|| self.minimum_supported_version())
    }

    fn minimum_supported_version(&self) -> DatabaseVersion {
        DatabaseVersion::ZERO
    }

    // Types

    fn column_type(&self, code: SqlTypeCode) -> String {
        match code {
            SqlTypeCode::Time | SqlTypeCode::Timestamp
                if self.settings.use_timestamptz_for_time_type =>
            {
                TIMESTAMP_WITH_TIME_ZONE.to_string()
            }
            SqlTypeCode::TimestampUtc | SqlTypeCode::TimestampWithTimeZone => {
                TIMESTAMP_WITH_TIME_ZONE.to_string()
            }
            SqlTypeCode::TinyInt | SqlTypeCode::SmallInt | SqlTypeCode::Integer => {
                self.base.column_type(SqlTypeCode::BigInt)
            }
            SqlTypeCode::Char => self.base.column_type(SqlTypeCode::Varchar),
            SqlTypeCode::Blob => "bytea".to_string(),
            SqlTypeCode::Double => "double precision".to_string(),
            SqlTypeCode::LongVarchar | SqlTypeCode::Clob | SqlTypeCode::NClob => {
                "character varying".to_string()
            }
            SqlTypeCode::Numeric => "numeric".to_string(),
            SqlTypeCode::Decimal => "decimal".to_string(),
            other => self.base.column_type(other),
        }
    }

    fn ddl_type(&self, code: SqlTypeCode, size: Size) -> String {
        let template = match code {
            SqlTypeCode::Float => CapacityDependentDdlType::new("float($p)")
                .with_capacity(24, "real")
                .with_capacity(53, "double precision")
                .template_for(Some(size.precision.unwrap_or(53)))
                .to_string(),
            SqlTypeCode::Varchar | SqlTypeCode::Char
                if size.length.is_some_and(|l| l > self.max_varchar_length()) =>
            {
                self.column_type(SqlTypeCode::LongVarchar)
            }
            other => self.column_type(other),
        };
        expand_type_template(&template, size)
    }

    fn jdbc_type(&self, code: SqlTypeCode) -> JdbcTypeDescriptor {
        match code {
            SqlTypeCode::TinyInt | SqlTypeCode::SmallInt | SqlTypeCode::Integer => {
                JdbcTypeDescriptor::widened(code, SqlTypeCode::BigInt)
            }
            other => JdbcTypeDescriptor::identity(other),
        }
    }

    fn resolve_type_code(&self, reported: SqlTypeCode, column_type_name: &str) -> SqlTypeCode {
        if reported == SqlTypeCode::Timestamp && column_type_name == TIMESTAMP_WITH_TIME_ZONE {
            SqlTypeCode::TimestampWithTimeZone
        } else {
            reported
        }
    }

    fn array_type_name(&self, element_type_name: &str) -> String {
        let element = if element_type_name == "varchar" {
            "text"
        } else {
            element_type_name
        };
        self.base.array_type_name(element)
    }

    fn max_varchar_length(&self) -> u32 {
        2_621_440
    }

    fn max_varbinary_length(&self) -> u32 {
        10_485_760
    }

    fn current_timestamp(&self) -> &'static str {
        "current_timestamp"
    }

    fn current_time(&self) -> &'static str {
        "current_timestamp"
    }

    // Locking

    fn locking_support(&self) -> LockingSupport {
        LockingSupport::clause_only()
    }

    fn write_lock_string(&self, timeout: LockTimeout) -> Result<String> {
        self.check_lock_timeout(timeout)?;
        Ok(self.for_update_string().to_string())
    }

    // Spanner has no shared row locks.
    fn read_lock_string(&self, timeout: LockTimeout) -> Result<String> {
        self.write_lock_string(timeout)
    }

    // Schema management

    fn current_schema_command(&self) -> &'static str {
        ""
    }

    fn truncate_table_statement(&self, table_name: &str) -> String {
        format!("delete from {table_name}")
    }

    fn cascade_constraints_string(&self) -> &'static str {
        ""
    }

    fn row_id(&self) -> Option<&'static str> {
        None
    }

    fn identity_column_string(&self) -> &'static str {
        "generated by default as identity (bit_reversed_positive)"
    }

    fn add_foreign_key_constraint_string(
        &self,
        constraint_name: &str,
        foreign_key: &[String],
        referenced_table: &str,
        primary_key: &[String],
    ) -> String {
        format!(
            " add constraint {} foreign key ({}) references {referenced_table} ({})",
            self.quote_identifier(constraint_name),
            foreign_key.join(", "),
            primary_key.join(", ")
        )
    }

    fn unique_delegate(&self) -> UniqueDelegate {
        UniqueDelegate::CreateUniqueIndex
    }

    fn table_exporter(&self) -> &dyn TableExporter {
        &SpannerTableExporter
    }

    fn sequence_support(&self) -> &dyn SequenceSupport {
        &SpannerSequenceSupport
    }

    fn aggregate_support(&self) -> &dyn AggregateSupport {
        &SpannerAggregateSupport
    }

    fn function_registry(&self) -> &FunctionRegistry {
        &self.functions
    }

    // Multi-table mutations

    fn local_temporary_table_strategy(&self) -> Option<TemporaryTableStrategy> {
        None
    }

    fn global_temporary_table_strategy(&self) -> Option<TemporaryTableStrategy> {
        None
    }

    fn persistent_temporary_table_strategy(&self) -> Option<TemporaryTableStrategy> {
        Some(TemporaryTableStrategy::Persistent)
    }

    fn fallback_mutation_strategy(&self) -> MutationStrategy {
        MutationStrategy::PersistentTable
    }

    fn fallback_insert_strategy(&self) -> MutationStrategy {
        MutationStrategy::PersistentTable
    }

    // Failures

    fn classify_failure(&self, failure: &BackendFailure) -> Option<ConstraintViolation> {
        classifier::classify(failure)
    }

    // Rendering

    fn translator(&self) -> Box<dyn SqlAstTranslator + '_> {
        Box::new(SpannerTranslator::new(self, self.settings.like_escape_policy))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_feature_is_off() {
        let dialect = SpannerPgDialect::new();
        assert_eq!(dialect.capabilities(), &Capabilities::none());
        for feature in Feature::ALL {
            assert!(!dialect.supports(feature), "{feature} should be off");
        }
    }

    #[test]
    fn test_base_profile_is_untouched() {
        let dialect = SpannerPgDialect::new();
        assert!(dialect.base.supports(Feature::Lateral));
        assert_eq!(dialect.base.column_type(SqlTypeCode::Integer), "integer");
        assert_eq!(dialect.column_type(SqlTypeCode::Integer), "bigint");
    }

    #[test]
    fn test_version() {
        assert_eq!(SpannerPgDialect::new().version(), DatabaseVersion::ZERO);
        let dialect = SpannerPgDialect::with_settings(SpannerSettings {
            version: Some(DatabaseVersion::new(2, 1, 0)),
            ..SpannerSettings::default()
        });
        assert_eq!(dialect.version(), DatabaseVersion::new(2, 1, 0));
    }
}
