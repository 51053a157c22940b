//! AST-to-text translation.
//!
//! A [`SqlAstTranslator`] walks a [`Statement`] and appends SQL text to a
//! per-statement [`TranslationState`]. Every hook has a default that calls the
//! matching free function in [`standard`], so a backend override can replace
//! one hook and still delegate to the standard behavior for the rest (or
//! call the standard function itself, around its own additions).
//!
//! ```rust
//! use dialect_sql_core::ast::{Expr, SelectColumn, SelectStatement, Statement, TableRef};
//! use dialect_sql_core::dialect::{Dialect, PostgresDialect};
//!
//! let dialect = PostgresDialect::new();
//! let select = SelectStatement {
//!     where_clause: Some(Expr::column("id").eq(Expr::Parameter)),
//!     ..SelectStatement::new(vec![SelectColumn::new(Expr::column("name"))], Some(TableRef::table("users")))
//! };
//! let out = dialect.translate(&Statement::Select(select)).unwrap();
//! assert_eq!(out.sql, "select name from users where id = ?");
//! assert_eq!(out.parameter_count, 1);
//! ```

mod like;
pub mod standard;

pub use like::{render_backslash_escaped_pattern, LikeEscapePolicy};

use std::collections::BTreeSet;

use crate::ast::{
    CteMaterialization, DeleteStatement, Expr, FunctionCall, InsertStatement, LikePredicate,
    LockClause, NamedTable, SelectStatement, Statement, TableRef, UpdateStatement, WithClause,
};
use crate::dialect::Dialect;
use crate::error::Result;

/// The DML clause a target table is rendered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DmlClause {
    /// `insert into <target>`.
    Insert,
    /// `update <target>`.
    Update,
    /// `delete from <target>`.
    Delete,
}

/// A table registered as affected by the statement being rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AffectedTable {
    /// Table expression, possibly schema-qualified.
    pub name: String,
    /// Length of the rendered text when the table was registered.
    pub offset: usize,
}

/// Mutable state of one translation.
///
/// Created fresh for every statement and consumed when the statement is
/// finished; it is never carried over to the next statement.
#[derive(Debug, Default)]
pub struct TranslationState {
    sql: String,
    affected_tables: Vec<AffectedTable>,
    parameter_count: usize,
}

impl TranslationState {
    /// Appends text.
    pub fn append(&mut self, sql: &str) {
        self.sql.push_str(sql);
    }

    /// The text rendered so far.
    #[must_use]
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Registers `name` as affected at the current position.
    pub fn register_affected_table(&mut self, name: &str) {
        self.affected_tables.push(AffectedTable {
            name: name.to_string(),
            offset: self.sql.len(),
        });
    }

    /// Tables registered so far, in registration order.
    #[must_use]
    pub fn affected_tables(&self) -> &[AffectedTable] {
        &self.affected_tables
    }

    /// Counts one rendered parameter placeholder.
    pub fn add_parameter(&mut self) {
        self.parameter_count += 1;
    }

    /// Appends a fragment and counts its placeholders.
    pub fn append_fragment(&mut self, fragment: &Fragment) {
        self.sql.push_str(&fragment.sql);
        self.parameter_count += fragment.parameters;
    }

    /// Starts rendering into an empty buffer and parameter count.
    pub(crate) fn begin_fragment(&mut self) -> (String, usize) {
        (
            std::mem::take(&mut self.sql),
            std::mem::take(&mut self.parameter_count),
        )
    }

    /// Puts the saved buffer and count back, returning what was rendered
    /// since [`TranslationState::begin_fragment`].
    pub(crate) fn end_fragment(&mut self, (sql, parameters): (String, usize)) -> Fragment {
        Fragment {
            sql: std::mem::replace(&mut self.sql, sql),
            parameters: std::mem::replace(&mut self.parameter_count, parameters),
        }
    }

    fn finish(self) -> TranslatedStatement {
        TranslatedStatement {
            sql: self.sql,
            affected_tables: self.affected_tables,
            parameter_count: self.parameter_count,
        }
    }
}

/// SQL text rendered apart from the main buffer, with the number of
/// parameter placeholders it contains.
///
/// Emulations that repeat an operand push the fragment once per copy, so
/// the placeholder count follows the emitted text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fragment {
    /// The text.
    pub sql: String,
    /// Placeholders in `sql`.
    pub parameters: usize,
}

impl Fragment {
    /// Plain text without placeholders.
    #[must_use]
    pub fn text(sql: &str) -> Self {
        Self {
            sql: sql.to_string(),
            parameters: 0,
        }
    }

    /// Appends plain text.
    pub fn push_str(&mut self, sql: &str) {
        self.sql.push_str(sql);
    }

    /// Appends another fragment, placeholders included.
    pub fn push(&mut self, other: &Self) {
        self.sql.push_str(&other.sql);
        self.parameters += other.parameters;
    }
}

/// The outcome of translating one statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslatedStatement {
    /// The SQL text.
    pub sql: String,
    /// Affected-table registrations, in order.
    pub affected_tables: Vec<AffectedTable>,
    /// Number of parameter placeholders.
    pub parameter_count: usize,
}

impl TranslatedStatement {
    /// Distinct names of the affected tables.
    #[must_use]
    pub fn affected_table_names(&self) -> BTreeSet<&str> {
        self.affected_tables.iter().map(|t| t.name.as_str()).collect()
    }
}

/// Renders statements for one dialect.
pub trait SqlAstTranslator {
    /// The dialect being rendered for.
    fn dialect(&self) -> &dyn Dialect;

    /// The state of the current translation.
    fn state(&self) -> &TranslationState;

    /// Mutable access to the state of the current translation.
    fn state_mut(&mut self) -> &mut TranslationState;

    /// Appends text to the current translation.
    fn append_sql(&mut self, sql: &str) {
        self.state_mut().append(sql);
    }

    /// Translates a whole statement.
    ///
    /// # Errors
    ///
    /// Returns an error when the statement uses a feature the backend lacks.
    fn translate(&mut self, statement: &Statement) -> Result<TranslatedStatement> {
        *self.state_mut() = TranslationState::default();
        let rendered = standard::visit_statement(self, statement);
        let state = std::mem::take(self.state_mut());
        rendered?;
        let translated = state.finish();
        tracing::debug!(
            dialect = self.dialect().name(),
            sql = %translated.sql,
            parameters = translated.parameter_count,
            "Translated statement"
        );
        Ok(translated)
    }

    /// Renders a SELECT.
    ///
    /// # Errors
    ///
    /// Returns an error when the query uses a feature the backend lacks.
    fn visit_select(&mut self, select: &SelectStatement) -> Result<()> {
        standard::visit_select(self, select)
    }

    /// Renders an INSERT.
    ///
    /// # Errors
    ///
    /// Returns an error when the statement uses a feature the backend lacks.
    fn visit_insert(&mut self, insert: &InsertStatement) -> Result<()> {
        standard::visit_insert(self, insert)
    }

    /// Renders an UPDATE.
    ///
    /// # Errors
    ///
    /// Returns an error when the statement uses a feature the backend lacks.
    fn visit_update(&mut self, update: &UpdateStatement) -> Result<()> {
        standard::visit_update(self, update)
    }

    /// Renders a DELETE.
    ///
    /// # Errors
    ///
    /// Returns an error when the statement uses a feature the backend lacks.
    fn visit_delete(&mut self, delete: &DeleteStatement) -> Result<()> {
        standard::visit_delete(self, delete)
    }

    /// Renders a WITH clause; `dml` is set when it belongs to a DML statement.
    ///
    /// # Errors
    ///
    /// Returns an error for recursive or DML CTEs the backend lacks.
    fn visit_with_clause(&mut self, with: &WithClause, dml: bool) -> Result<()> {
        standard::visit_with_clause(self, with, dml)
    }

    /// Renders the materialization hint of a CTE.
    ///
    /// # Errors
    ///
    /// Overrides may refuse hints.
    fn render_materialization_hint(&mut self, materialization: CteMaterialization) -> Result<()> {
        standard::render_materialization_hint(self, materialization)
    }

    /// Renders a FROM item.
    ///
    /// # Errors
    ///
    /// Returns an error for LATERAL joins the backend lacks.
    fn visit_table_ref(&mut self, table: &TableRef) -> Result<()> {
        standard::visit_table_ref(self, table)
    }

    /// Renders the target table of a DML statement and registers it as
    /// affected.
    ///
    /// # Errors
    ///
    /// Overrides may refuse targets.
    fn render_dml_target_table(&mut self, table: &NamedTable, clause: DmlClause) -> Result<()> {
        standard::render_dml_target_table(self, table, clause)
    }

    /// Renders whatever follows the SET list of an UPDATE, i.e. `from ...`.
    ///
    /// # Errors
    ///
    /// Returns an error when the statement has a FROM list the backend lacks.
    fn render_from_clause_after_update_set(&mut self, update: &UpdateStatement) -> Result<()> {
        standard::render_from_clause_after_update_set(self, update)
    }

    /// Renders an expression.
    ///
    /// # Errors
    ///
    /// Returns an error when the expression uses a feature the backend lacks.
    fn visit_expr(&mut self, expr: &Expr) -> Result<()> {
        standard::visit_expr(self, expr)
    }

    /// Renders a whole LIKE predicate.
    ///
    /// # Errors
    ///
    /// Returns an error when an operand cannot be rendered.
    fn visit_like_predicate(&mut self, like: &LikePredicate) -> Result<()> {
        standard::visit_like_predicate(self, like)
    }

    /// Renders the pattern of a LIKE predicate and its escape clause.
    ///
    /// # Errors
    ///
    /// Returns an error when an operand cannot be rendered.
    fn render_like_pattern(&mut self, like: &LikePredicate) -> Result<()> {
        standard::render_like_pattern(self, like)
    }

    /// Renders a function call through the function registry.
    ///
    /// # Errors
    ///
    /// Returns an error for unknown functions or bad arities.
    fn visit_function(&mut self, function: &FunctionCall) -> Result<()> {
        standard::visit_function(self, function)
    }

    /// Renders a pessimistic lock clause.
    ///
    /// # Errors
    ///
    /// Returns an error when the backend cannot express the lock request.
    fn visit_lock_clause(&mut self, lock: &LockClause) -> Result<()> {
        standard::visit_lock_clause(self, lock)
    }
}

/// The translator used by dialects without rendering overrides.
pub struct StandardTranslator<'d> {
    dialect: &'d dyn Dialect,
    state: TranslationState,
}

impl<'d> StandardTranslator<'d> {
    /// Creates a translator for `dialect`.
    #[must_use]
    pub fn new(dialect: &'d dyn Dialect) -> Self {
        Self {
            dialect,
            state: TranslationState::default(),
        }
    }
}

impl SqlAstTranslator for StandardTranslator<'_> {
    fn dialect(&self) -> &dyn Dialect {
        self.dialect
    }

    fn state(&self) -> &TranslationState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut TranslationState {
        &mut self.state
    }
}
