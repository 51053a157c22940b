//! Boolean capability flags of a backend.
//!
//! A backend profile is a base [`Capabilities`] record plus an override map,
//! e.g. `Capabilities::postgres().with_overrides(&[(Feature::Lateral, false)])`.
//! Once built, a record is never mutated and may be shared freely.

use std::collections::BTreeSet;
use std::fmt;

/// A named SQL feature a backend may or may not support.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Feature {
    /// `for update nowait`.
    NoWait,
    /// `for update skip locked`.
    SkipLocked,
    /// User-defined (struct) types.
    UserDefinedTypes,
    /// Aggregate `filter (where ...)`.
    FilterClause,
    /// `cycle ... using` in recursive CTEs.
    RecursiveCycleUsingClause,
    /// `search ... set` in recursive CTEs.
    RecursiveSearchClause,
    /// `unique` inside a column definition.
    UniqueConstraintInColumnDefinition,
    /// `(a, b) > (x, y)` row-value comparisons.
    RowValueConstructorGtLtSyntax,
    /// Row-value constructors in `any`/`all` predicates.
    RowValueConstructorSyntaxInQuantifiedPredicates,
    /// Row-value constructors on the left of `in (subquery)`.
    RowValueConstructorSyntaxInInSubquery,
    /// A case-insensitive LIKE operator.
    CaseInsensitiveLike,
    /// LATERAL joins.
    Lateral,
    /// `update ... set ... from ...`.
    FromClauseInUpdate,
    /// Row constructors in equality comparisons and IN lists.
    RowConstructor,
    /// `drop constraint if exists <name>`.
    IfExistsBeforeConstraintName,
    /// `alter table if exists <table>`.
    IfExistsAfterAlterTable,
    /// `is distinct from`.
    DistinctFromPredicate,
    /// `partition by` in window specifications.
    PartitionBy,
    /// CTEs attached to INSERT, UPDATE or DELETE.
    NonQueryWithCte,
    /// `with recursive`.
    RecursiveCte,
    /// `create schema` / `drop schema`.
    CreateSchema,
    /// Truncating several tables in one statement.
    BatchTruncate,
    /// Procedures returning ref cursors.
    RefCursor,
    /// `materialized` / `not materialized` CTE hints.
    MaterializationHint,
}

impl Feature {
    /// Every feature, in declaration order.
    pub const ALL: [Self; 24] = [
        Self::NoWait,
        Self::SkipLocked,
        Self::UserDefinedTypes,
        Self::FilterClause,
        Self::RecursiveCycleUsingClause,
        Self::RecursiveSearchClause,
        Self::UniqueConstraintInColumnDefinition,
        Self::RowValueConstructorGtLtSyntax,
        Self::RowValueConstructorSyntaxInQuantifiedPredicates,
        Self::RowValueConstructorSyntaxInInSubquery,
        Self::CaseInsensitiveLike,
        Self::Lateral,
        Self::FromClauseInUpdate,
        Self::RowConstructor,
        Self::IfExistsBeforeConstraintName,
        Self::IfExistsAfterAlterTable,
        Self::DistinctFromPredicate,
        Self::PartitionBy,
        Self::NonQueryWithCte,
        Self::RecursiveCte,
        Self::CreateSchema,
        Self::BatchTruncate,
        Self::RefCursor,
        Self::MaterializationHint,
    ];

    /// Human readable name, used in error messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NoWait => "for update nowait",
            Self::SkipLocked => "for update skip locked",
            Self::UserDefinedTypes => "user-defined types",
            Self::FilterClause => "aggregate filter clause",
            Self::RecursiveCycleUsingClause => "recursive cycle using clause",
            Self::RecursiveSearchClause => "recursive search clause",
            Self::UniqueConstraintInColumnDefinition => "unique constraint in column definition",
            Self::RowValueConstructorGtLtSyntax => "row value constructor comparison",
            Self::RowValueConstructorSyntaxInQuantifiedPredicates => {
                "row value constructor in quantified predicates"
            }
            Self::RowValueConstructorSyntaxInInSubquery => "row value constructor in IN subquery",
            Self::CaseInsensitiveLike => "case-insensitive like",
            Self::Lateral => "lateral",
            Self::FromClauseInUpdate => "from clause in update",
            Self::RowConstructor => "row constructor",
            Self::IfExistsBeforeConstraintName => "if exists before constraint name",
            Self::IfExistsAfterAlterTable => "if exists after alter table",
            Self::DistinctFromPredicate => "distinct from predicate",
            Self::PartitionBy => "partition by",
            Self::NonQueryWithCte => "common table expressions in DML statements",
            Self::RecursiveCte => "recursive common table expressions",
            Self::CreateSchema => "schema creation",
            Self::BatchTruncate => "batch truncate",
            Self::RefCursor => "ref cursors",
            Self::MaterializationHint => "CTE materialization hints",
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An immutable set of supported features.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Capabilities {
    supported: BTreeSet<Feature>,
}

impl Capabilities {
    /// A record supporting nothing.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            supported: BTreeSet::new(),
        }
    }

    /// A record supporting exactly `features`.
    #[must_use]
    pub fn from_supported(features: &[Feature]) -> Self {
        Self {
            supported: features.iter().copied().collect(),
        }
    }

    /// The PostgreSQL base profile.
    #[must_use]
    pub fn postgres() -> Self {
        Self::from_supported(&[
            Feature::NoWait,
            Feature::SkipLocked,
            Feature::UserDefinedTypes,
            Feature::FilterClause,
            Feature::RecursiveCycleUsingClause,
            Feature::RecursiveSearchClause,
            Feature::UniqueConstraintInColumnDefinition,
            Feature::RowValueConstructorGtLtSyntax,
            Feature::RowValueConstructorSyntaxInQuantifiedPredicates,
            Feature::RowValueConstructorSyntaxInInSubquery,
            Feature::CaseInsensitiveLike,
            Feature::Lateral,
            Feature::FromClauseInUpdate,
            Feature::RowConstructor,
            Feature::IfExistsBeforeConstraintName,
            Feature::IfExistsAfterAlterTable,
            Feature::DistinctFromPredicate,
            Feature::PartitionBy,
            Feature::NonQueryWithCte,
            Feature::RecursiveCte,
            Feature::CreateSchema,
            Feature::BatchTruncate,
            Feature::MaterializationHint,
        ])
    }

    /// Returns a copy with each `(feature, supported)` pair applied.
    #[must_use]
    pub fn with_overrides(&self, overrides: &[(Feature, bool)]) -> Self {
        let mut supported = self.supported.clone();
        for &(feature, enabled) in overrides {
            if enabled {
                supported.insert(feature);
            } else {
                supported.remove(&feature);
            }
        }
        Self { supported }
    }

    /// Returns whether `feature` is supported.
    #[must_use]
    pub fn supports(&self, feature: Feature) -> bool {
        self.supported.contains(&feature)
    }

    /// Iterates over the supported features.
    pub fn iter(&self) -> impl Iterator<Item = Feature> + '_ {
        self.supported.iter().copied()
    }
}
