//! Statement rendering overrides for Spanner.

use dialect_sql_core::ast::{CteMaterialization, LikePredicate, NamedTable, UpdateStatement};
use dialect_sql_core::translate::{
    render_backslash_escaped_pattern, standard, DmlClause, LikeEscapePolicy, SqlAstTranslator,
    TranslationState,
};
use dialect_sql_core::{Dialect, Result};

/// Renders statements for [`SpannerPgDialect`](crate::SpannerPgDialect).
///
/// Differs from the standard translator in five hooks:
///
/// - CTE materialization hints render nothing.
/// - The `from` list of an UPDATE is dropped.
/// - DML targets always render their alias, INSERT included.
/// - LIKE always uses the dialect's keyword, `ilike` for case-insensitive
///   predicates.
/// - A LIKE pattern without an escape character is rendered according to
///   the configured [`LikeEscapePolicy`].
pub struct SpannerTranslator<'d> {
    dialect: &'d dyn Dialect,
    like_escape_policy: LikeEscapePolicy,
    state: TranslationState,
}

impl<'d> SpannerTranslator<'d> {
    /// Creates a translator for `dialect`.
    #[must_use]
    pub fn new(dialect: &'d dyn Dialect, like_escape_policy: LikeEscapePolicy) -> Self {
        Self {
            dialect,
            like_escape_policy,
            state: TranslationState::default(),
        }
    }
}

impl SqlAstTranslator for SpannerTranslator<'_> {
    fn dialect(&self) -> &dyn Dialect {
        self.dialect
    }

    fn state(&self) -> &TranslationState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut TranslationState {
        &mut self.state
    }

    fn render_materialization_hint(&mut self, _materialization: CteMaterialization) -> Result<()> {
        Ok(())
    }

    fn render_from_clause_after_update_set(&mut self, _update: &UpdateStatement) -> Result<()> {
        Ok(())
    }

    fn render_dml_target_table(&mut self, table: &NamedTable, _clause: DmlClause) -> Result<()> {
        let expression = table.table_expression();
        self.append_sql(&expression);
        self.state.register_affected_table(&expression);
        standard::render_table_identification_variable(self, table);
        Ok(())
    }

    fn visit_like_predicate(&mut self, like: &LikePredicate) -> Result<()> {
        self.visit_expr(&like.match_expr)?;
        standard::render_like_operator(self, like);
        self.render_like_pattern(like)
    }

    fn render_like_pattern(&mut self, like: &LikePredicate) -> Result<()> {
        if let Some(escape) = &like.escape {
            self.visit_expr(&like.pattern)?;
            self.append_sql(" escape ");
            return self.visit_expr(escape);
        }
        match self.like_escape_policy {
            LikeEscapePolicy::ReescapeBackslash => {
                render_backslash_escaped_pattern(self, &like.pattern)
            }
            LikeEscapePolicy::OmitEscapeClause => self.visit_expr(&like.pattern),
        }
    }
}

#[cfg(test)]
mod tests {
    use dialect_sql_core::ast::{Expr, SelectColumn, SelectStatement, Statement, TableRef};

    use super::*;
    use crate::SpannerPgDialect;

    fn predicate(dialect: &SpannerPgDialect, policy: LikeEscapePolicy, like: LikePredicate) -> String {
        let select = SelectStatement {
            where_clause: Some(Expr::Like(like)),
            ..SelectStatement::new(
                vec![SelectColumn::new(Expr::Wildcard { table: None })],
                Some(TableRef::table("t")),
            )
        };
        let out = SpannerTranslator::new(dialect, policy)
            .translate(&Statement::Select(select))
            .unwrap();
        out.sql.trim_start_matches("select * from t where ").to_string()
    }

    #[test]
    fn test_policies_differ_only_without_escape() {
        let dialect = SpannerPgDialect::new();
        let plain = || LikePredicate::new(Expr::column("path"), Expr::string("c:\\%"));
        assert_eq!(
            predicate(&dialect, LikeEscapePolicy::ReescapeBackslash, plain()),
            "path like 'c:\\\\%'"
        );
        assert_eq!(
            predicate(&dialect, LikeEscapePolicy::OmitEscapeClause, plain()),
            "path like 'c:\\%'"
        );
        for policy in [LikeEscapePolicy::ReescapeBackslash, LikeEscapePolicy::OmitEscapeClause] {
            assert_eq!(
                predicate(&dialect, policy, plain().escape(Expr::string("!"))),
                "path like 'c:\\%' escape '!'"
            );
        }
    }

    #[test]
    fn test_non_literal_pattern_is_wrapped() {
        let dialect = SpannerPgDialect::new();
        let like = LikePredicate::new(Expr::column("name"), Expr::Parameter).negated();
        assert_eq!(
            predicate(&dialect, LikeEscapePolicy::ReescapeBackslash, like),
            "name not like replace(?,'\\','\\\\')"
        );
    }
}
