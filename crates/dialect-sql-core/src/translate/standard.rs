//! Standard rendering, shared by every translator.
//!
//! Each function renders one construct through the hooks of the
//! [`SqlAstTranslator`] it is given, so nested constructs still reach the
//! overrides of that translator.

use super::{DmlClause, Fragment, SqlAstTranslator};
use crate::ast::{
    BinaryOp, CteMaterialization, DeleteStatement, Expr, FunctionCall, InsertSource,
    InsertStatement, LikePredicate, Literal, LockClause, NamedTable, OrderBy, OrderDirection,
    SelectStatement, Statement, TableRef, UpdateStatement, WindowSpec, WithClause,
};
use crate::dialect::Feature;
use crate::error::{DialectError, Result};
use crate::lock::LockMode;

/// Dispatches on the statement kind.
///
/// # Errors
///
/// Propagates rendering errors.
pub fn visit_statement<T: SqlAstTranslator + ?Sized>(t: &mut T, statement: &Statement) -> Result<()> {
    match statement {
        Statement::Select(select) => t.visit_select(select),
        Statement::Insert(insert) => t.visit_insert(insert),
        Statement::Update(update) => t.visit_update(update),
        Statement::Delete(delete) => t.visit_delete(delete),
    }
}

fn separated<T, I, F>(t: &mut T, items: &[I], separator: &str, mut render: F) -> Result<()>
where
    T: SqlAstTranslator + ?Sized,
    F: FnMut(&mut T, &I) -> Result<()>,
{
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            t.append_sql(separator);
        }
        render(t, item)?;
    }
    Ok(())
}

fn expr_list<T: SqlAstTranslator + ?Sized>(t: &mut T, exprs: &[Expr]) -> Result<()> {
    separated(t, exprs, ", ", |t, e| t.visit_expr(e))
}

fn order_by_list<T: SqlAstTranslator + ?Sized>(t: &mut T, order_by: &[OrderBy]) -> Result<()> {
    separated(t, order_by, ", ", |t, o| {
        t.visit_expr(&o.expr)?;
        if o.direction == OrderDirection::Desc {
            t.append_sql(" desc");
        }
        Ok(())
    })
}

/// Renders `expr` into a [`Fragment`] without touching the main buffer or
/// parameter count.
///
/// # Errors
///
/// Propagates rendering errors.
pub fn render_fragment<T: SqlAstTranslator + ?Sized>(t: &mut T, expr: &Expr) -> Result<Fragment> {
    let saved = t.state_mut().begin_fragment();
    let rendered = t.visit_expr(expr);
    let fragment = t.state_mut().end_fragment(saved);
    rendered.map(|()| fragment)
}

/// `[with ...] select ...`.
///
/// # Errors
///
/// Propagates rendering errors.
pub fn visit_select<T: SqlAstTranslator + ?Sized>(t: &mut T, select: &SelectStatement) -> Result<()> {
    if select.columns.is_empty() {
        return Err(DialectError::IllegalArgument(
            "select statement without columns".to_string(),
        ));
    }
    if let Some(with) = &select.with {
        t.visit_with_clause(with, false)?;
    }
    t.append_sql("select ");
    if select.distinct {
        t.append_sql("distinct ");
    }
    separated(t, &select.columns, ", ", |t, column| {
        t.visit_expr(&column.expr)?;
        if let Some(alias) = &column.alias {
            t.append_sql(" as ");
            t.append_sql(alias);
        }
        Ok(())
    })?;
    if let Some(from) = &select.from {
        t.append_sql(" from ");
        t.visit_table_ref(from)?;
    }
    if let Some(predicate) = &select.where_clause {
        t.append_sql(" where ");
        t.visit_expr(predicate)?;
    }
    if !select.group_by.is_empty() {
        t.append_sql(" group by ");
        expr_list(t, &select.group_by)?;
    }
    if let Some(having) = &select.having {
        t.append_sql(" having ");
        t.visit_expr(having)?;
    }
    if !select.order_by.is_empty() {
        t.append_sql(" order by ");
        order_by_list(t, &select.order_by)?;
    }
    if let Some(limit) = &select.limit {
        t.append_sql(" limit ");
        t.visit_expr(limit)?;
    }
    if let Some(offset) = &select.offset {
        t.append_sql(" offset ");
        t.visit_expr(offset)?;
    }
    if let Some(lock) = &select.lock {
        t.visit_lock_clause(lock)?;
    }
    Ok(())
}

/// `with [recursive] name [(cols)] as [hint](select ...) `.
///
/// # Errors
///
/// Fails when the backend lacks recursive CTEs, or CTEs on DML when `dml`
/// is set.
pub fn visit_with_clause<T: SqlAstTranslator + ?Sized>(
    t: &mut T,
    with: &WithClause,
    dml: bool,
) -> Result<()> {
    if dml {
        t.dialect().require(Feature::NonQueryWithCte)?;
    }
    if with.recursive {
        t.dialect().require(Feature::RecursiveCte)?;
    }
    t.append_sql("with ");
    if with.recursive {
        t.append_sql("recursive ");
    }
    separated(t, &with.ctes, ", ", |t, cte| {
        t.append_sql(&cte.name);
        if !cte.columns.is_empty() {
            t.append_sql(" (");
            t.append_sql(&cte.columns.join(", "));
            t.append_sql(")");
        }
        t.append_sql(" as ");
        if let Some(materialization) = cte.materialization {
            t.render_materialization_hint(materialization)?;
        }
        t.append_sql("(");
        t.visit_select(&cte.query)?;
        t.append_sql(")");
        Ok(())
    })?;
    t.append_sql(" ");
    Ok(())
}

/// `materialized ` / `not materialized ` when the backend knows the hints.
///
/// # Errors
///
/// Never fails.
pub fn render_materialization_hint<T: SqlAstTranslator + ?Sized>(
    t: &mut T,
    materialization: CteMaterialization,
) -> Result<()> {
    if t.dialect().supports(Feature::MaterializationHint) {
        t.append_sql(match materialization {
            CteMaterialization::Materialized => "materialized ",
            CteMaterialization::NotMaterialized => "not materialized ",
        });
    }
    Ok(())
}

/// A FROM item: table, derived table or join.
///
/// # Errors
///
/// Fails for LATERAL joins the backend lacks.
pub fn visit_table_ref<T: SqlAstTranslator + ?Sized>(t: &mut T, table: &TableRef) -> Result<()> {
    match table {
        TableRef::Table(named) => {
            t.append_sql(&named.table_expression());
            render_table_identification_variable(t, named);
        }
        TableRef::Subquery { query, alias } => {
            t.append_sql("(");
            t.visit_select(query)?;
            t.append_sql(") ");
            t.append_sql(alias);
        }
        TableRef::Join { left, join } => {
            t.visit_table_ref(left)?;
            t.append_sql(" ");
            t.append_sql(join.join_type.as_str());
            if join.lateral {
                t.dialect().require(Feature::Lateral)?;
                t.append_sql(" lateral");
            }
            t.append_sql(" ");
            t.visit_table_ref(&join.table)?;
            if let Some(on) = &join.on {
                t.append_sql(" on ");
                t.visit_expr(on)?;
            }
        }
    }
    Ok(())
}

/// ` <alias>` when the table has one.
pub fn render_table_identification_variable<T: SqlAstTranslator + ?Sized>(
    t: &mut T,
    table: &NamedTable,
) {
    if let Some(alias) = &table.alias {
        t.append_sql(" ");
        t.append_sql(alias);
    }
}

/// Target name, affected-table registration, then the alias (except in
/// INSERT, where PostgreSQL rejects it).
///
/// # Errors
///
/// Never fails.
pub fn render_dml_target_table<T: SqlAstTranslator + ?Sized>(
    t: &mut T,
    table: &NamedTable,
    clause: DmlClause,
) -> Result<()> {
    let expression = table.table_expression();
    t.append_sql(&expression);
    t.state_mut().register_affected_table(&expression);
    if clause != DmlClause::Insert {
        render_table_identification_variable(t, table);
    }
    Ok(())
}

/// `insert into <target> [(cols)] values ... | select ... | default values`.
///
/// # Errors
///
/// Fails for empty VALUES lists and unsupported CTEs.
pub fn visit_insert<T: SqlAstTranslator + ?Sized>(t: &mut T, insert: &InsertStatement) -> Result<()> {
    if let Some(with) = &insert.with {
        t.visit_with_clause(with, true)?;
    }
    t.append_sql("insert into ");
    t.render_dml_target_table(&insert.target, DmlClause::Insert)?;
    if !insert.columns.is_empty() {
        t.append_sql(" (");
        t.append_sql(&insert.columns.join(", "));
        t.append_sql(")");
    }
    match &insert.values {
        InsertSource::Values(rows) => {
            if rows.is_empty() {
                return Err(DialectError::IllegalArgument(
                    "insert statement without values".to_string(),
                ));
            }
            t.append_sql(" values ");
            separated(t, rows, ", ", |t, row| {
                t.append_sql("(");
                expr_list(t, row)?;
                t.append_sql(")");
                Ok(())
            })?;
        }
        InsertSource::Query(query) => {
            t.append_sql(" ");
            t.visit_select(query)?;
        }
        InsertSource::DefaultValues => t.append_sql(" default values"),
    }
    Ok(())
}

/// `update <target> set ... [from ...] [where ...]`.
///
/// # Errors
///
/// Fails for empty SET lists and unsupported FROM lists or CTEs.
pub fn visit_update<T: SqlAstTranslator + ?Sized>(t: &mut T, update: &UpdateStatement) -> Result<()> {
    if update.assignments.is_empty() {
        return Err(DialectError::IllegalArgument(
            "update statement without assignments".to_string(),
        ));
    }
    if let Some(with) = &update.with {
        t.visit_with_clause(with, true)?;
    }
    t.append_sql("update ");
    t.render_dml_target_table(&update.target, DmlClause::Update)?;
    t.append_sql(" set ");
    separated(t, &update.assignments, ", ", |t, assignment| {
        t.append_sql(&assignment.column);
        t.append_sql(" = ");
        t.visit_expr(&assignment.value)
    })?;
    t.render_from_clause_after_update_set(update)?;
    if let Some(predicate) = &update.where_clause {
        t.append_sql(" where ");
        t.visit_expr(predicate)?;
    }
    Ok(())
}

/// ` from <items>` when the UPDATE has auxiliary tables.
///
/// # Errors
///
/// Fails when the backend lacks `update ... from`.
pub fn render_from_clause_after_update_set<T: SqlAstTranslator + ?Sized>(
    t: &mut T,
    update: &UpdateStatement,
) -> Result<()> {
    if update.from.is_empty() {
        return Ok(());
    }
    t.dialect().require(Feature::FromClauseInUpdate)?;
    t.append_sql(" from ");
    separated(t, &update.from, ", ", |t, table| t.visit_table_ref(table))
}

/// `delete from <target> [where ...]`.
///
/// # Errors
///
/// Fails for unsupported CTEs.
pub fn visit_delete<T: SqlAstTranslator + ?Sized>(t: &mut T, delete: &DeleteStatement) -> Result<()> {
    if let Some(with) = &delete.with {
        t.visit_with_clause(with, true)?;
    }
    t.append_sql("delete from ");
    t.render_dml_target_table(&delete.target, DmlClause::Delete)?;
    if let Some(predicate) = &delete.where_clause {
        t.append_sql(" where ");
        t.visit_expr(predicate)?;
    }
    Ok(())
}

/// The lock clause from the dialect's lock strings.
///
/// # Errors
///
/// Propagates the dialect's refusal of the lock request.
pub fn visit_lock_clause<T: SqlAstTranslator + ?Sized>(t: &mut T, lock: &LockClause) -> Result<()> {
    let clause = match lock.mode {
        LockMode::Write => t.dialect().write_lock_string(lock.timeout)?,
        LockMode::Read => t.dialect().read_lock_string(lock.timeout)?,
    };
    t.append_sql(&clause);
    Ok(())
}

/// Any expression.
///
/// # Errors
///
/// Propagates rendering errors.
pub fn visit_expr<T: SqlAstTranslator + ?Sized>(t: &mut T, expr: &Expr) -> Result<()> {
    match expr {
        Expr::Literal(literal) => render_literal(t, literal),
        Expr::Column { table, name } => {
            if let Some(table) = table {
                t.append_sql(table);
                t.append_sql(".");
            }
            t.append_sql(name);
        }
        Expr::Binary { left, op, right } => return visit_binary(t, left, *op, right),
        Expr::Unary { op, operand } => {
            t.append_sql(op.as_str());
            t.visit_expr(operand)?;
        }
        Expr::Like(like) => return t.visit_like_predicate(like),
        Expr::Function(function) => return t.visit_function(function),
        Expr::Window { function, window } => {
            t.visit_function(function)?;
            return render_window(t, window);
        }
        Expr::Subquery(query) => {
            t.append_sql("(");
            t.visit_select(query)?;
            t.append_sql(")");
        }
        Expr::Tuple(items) => {
            t.append_sql("(");
            expr_list(t, items)?;
            t.append_sql(")");
        }
        Expr::IsNull { expr, negated } => {
            t.visit_expr(expr)?;
            t.append_sql(if *negated { " is not null" } else { " is null" });
        }
        Expr::DistinctFrom {
            left,
            right,
            negated,
        } => return visit_distinct_from(t, left, right, *negated),
        Expr::In {
            expr,
            list,
            negated,
        } => return visit_in_list(t, expr, list, *negated),
        Expr::InSubquery {
            expr,
            query,
            negated,
        } => {
            if matches!(expr.as_ref(), Expr::Tuple(_)) {
                t.dialect()
                    .require(Feature::RowValueConstructorSyntaxInInSubquery)?;
            }
            t.visit_expr(expr)?;
            t.append_sql(if *negated { " not in (" } else { " in (" });
            t.visit_select(query)?;
            t.append_sql(")");
        }
        Expr::Between {
            expr,
            low,
            high,
            negated,
        } => {
            t.visit_expr(expr)?;
            t.append_sql(if *negated { " not between " } else { " between " });
            t.visit_expr(low)?;
            t.append_sql(" and ");
            t.visit_expr(high)?;
        }
        Expr::Case {
            operand,
            when_clauses,
            else_clause,
        } => {
            t.append_sql("case");
            if let Some(operand) = operand {
                t.append_sql(" ");
                t.visit_expr(operand)?;
            }
            for (condition, result) in when_clauses {
                t.append_sql(" when ");
                t.visit_expr(condition)?;
                t.append_sql(" then ");
                t.visit_expr(result)?;
            }
            if let Some(otherwise) = else_clause {
                t.append_sql(" else ");
                t.visit_expr(otherwise)?;
            }
            t.append_sql(" end");
        }
        Expr::Cast { expr, data_type } => {
            t.append_sql("cast(");
            t.visit_expr(expr)?;
            t.append_sql(" as ");
            let target = t.dialect().cast_type(data_type);
            t.append_sql(&target);
            t.append_sql(")");
        }
        Expr::Paren(inner) => {
            t.append_sql("(");
            t.visit_expr(inner)?;
            t.append_sql(")");
        }
        Expr::Parameter => {
            let placeholder = t.dialect().parameter_placeholder();
            t.append_sql(placeholder);
            t.state_mut().add_parameter();
        }
        Expr::Wildcard { table } => {
            if let Some(table) = table {
                t.append_sql(table);
                t.append_sql(".");
            }
            t.append_sql("*");
        }
    }
    Ok(())
}

fn render_literal<T: SqlAstTranslator + ?Sized>(t: &mut T, literal: &Literal) {
    let text = match literal {
        Literal::Integer(i) => i.to_string(),
        Literal::Float(f) => f.to_string(),
        Literal::String(s) => t.dialect().quote_string(s),
        Literal::Boolean(b) => b.to_string(),
        Literal::Null => "null".to_string(),
    };
    t.append_sql(&text);
}

fn render_window<T: SqlAstTranslator + ?Sized>(t: &mut T, window: &WindowSpec) -> Result<()> {
    t.append_sql(" over (");
    if !window.partition_by.is_empty() {
        t.dialect().require(Feature::PartitionBy)?;
        t.append_sql("partition by ");
        expr_list(t, &window.partition_by)?;
        if !window.order_by.is_empty() {
            t.append_sql(" ");
        }
    }
    if !window.order_by.is_empty() {
        t.append_sql("order by ");
        order_by_list(t, &window.order_by)?;
    }
    t.append_sql(")");
    Ok(())
}

fn visit_binary<T: SqlAstTranslator + ?Sized>(
    t: &mut T,
    left: &Expr,
    op: BinaryOp,
    right: &Expr,
) -> Result<()> {
    if let (Expr::Tuple(lhs), Expr::Tuple(rhs)) = (left, right) {
        if op.is_comparison() {
            return visit_tuple_comparison(t, lhs, op, rhs);
        }
    }
    t.visit_expr(left)?;
    t.append_sql(" ");
    t.append_sql(op.as_str());
    t.append_sql(" ");
    t.visit_expr(right)
}

fn render_all<T: SqlAstTranslator + ?Sized>(t: &mut T, exprs: &[Expr]) -> Result<Vec<Fragment>> {
    exprs.iter().map(|e| render_fragment(t, e)).collect()
}

/// Row-value comparison, native or expanded per element.
///
/// `=` and `<>` need [`Feature::RowConstructor`]; `<`, `<=`, `>`, `>=` need
/// [`Feature::RowValueConstructorGtLtSyntax`]. Without the feature, equality
/// becomes a conjunction, inequality a disjunction and orderings a
/// lexicographic expansion.
///
/// # Errors
///
/// Fails when the tuples differ in length.
pub fn visit_tuple_comparison<T: SqlAstTranslator + ?Sized>(
    t: &mut T,
    lhs: &[Expr],
    op: BinaryOp,
    rhs: &[Expr],
) -> Result<()> {
    if lhs.len() != rhs.len() || lhs.is_empty() {
        return Err(DialectError::IllegalArgument(format!(
            "cannot compare tuples of {} and {} elements",
            lhs.len(),
            rhs.len()
        )));
    }
    let native = match op {
        BinaryOp::Eq | BinaryOp::NotEq => t.dialect().supports(Feature::RowConstructor),
        _ => t.dialect().supports(Feature::RowValueConstructorGtLtSyntax),
    };
    let left = render_all(t, lhs)?;
    let right = render_all(t, rhs)?;
    let sql = if native {
        let mut sql = Fragment::text("(");
        sql.push(&joined(&left, ", "));
        sql.push_str(&format!(") {} (", op.as_str()));
        sql.push(&joined(&right, ", "));
        sql.push_str(")");
        sql
    } else {
        match op {
            BinaryOp::Eq => pairwise(&left, &right, "=", " and "),
            BinaryOp::NotEq => pairwise(&left, &right, "<>", " or "),
            _ => lexicographic(&left, op, &right),
        }
    };
    t.state_mut().append_fragment(&sql);
    Ok(())
}

fn joined(parts: &[Fragment], separator: &str) -> Fragment {
    let mut out = Fragment::default();
    for (i, part) in parts.iter().enumerate() {
        if i > 0 {
            out.push_str(separator);
        }
        out.push(part);
    }
    out
}

fn parenthesized(inner: &Fragment) -> Fragment {
    let mut out = Fragment::text("(");
    out.push(inner);
    out.push_str(")");
    out
}

fn comparison(left: &Fragment, op: &str, right: &Fragment) -> Fragment {
    let mut out = left.clone();
    out.push_str(&format!(" {op} "));
    out.push(right);
    out
}

fn pairwise(left: &[Fragment], right: &[Fragment], op: &str, joiner: &str) -> Fragment {
    let parts: Vec<Fragment> = left
        .iter()
        .zip(right)
        .map(|(l, r)| comparison(l, op, r))
        .collect();
    parenthesized(&joined(&parts, joiner))
}

// Each operand but the last appears twice, in the strict and the equal test.
fn lexicographic(left: &[Fragment], op: BinaryOp, right: &[Fragment]) -> Fragment {
    let last = left.len() - 1;
    let mut sql = comparison(&left[last], op.as_str(), &right[last]);
    for i in (0..last).rev() {
        let mut step = comparison(&left[i], op.strict().as_str(), &right[i]);
        step.push_str(" or ");
        step.push(&comparison(&left[i], "=", &right[i]));
        step.push_str(" and ");
        if i + 1 == last {
            step.push(&sql);
        } else {
            step.push(&parenthesized(&sql));
        }
        sql = step;
    }
    parenthesized(&sql)
}

fn visit_in_list<T: SqlAstTranslator + ?Sized>(
    t: &mut T,
    expr: &Expr,
    list: &[Expr],
    negated: bool,
) -> Result<()> {
    if list.is_empty() {
        t.append_sql(if negated { "(1 = 1)" } else { "(1 = 0)" });
        return Ok(());
    }
    if let Expr::Tuple(lhs) = expr {
        if !t.dialect().supports(Feature::RowConstructor) {
            return visit_tuple_in_list(t, lhs, list, negated);
        }
    }
    t.visit_expr(expr)?;
    t.append_sql(if negated { " not in (" } else { " in (" });
    expr_list(t, list)?;
    t.append_sql(")");
    Ok(())
}

fn visit_tuple_in_list<T: SqlAstTranslator + ?Sized>(
    t: &mut T,
    lhs: &[Expr],
    list: &[Expr],
    negated: bool,
) -> Result<()> {
    if lhs.is_empty() {
        return Err(DialectError::IllegalArgument(
            "cannot compare empty tuples".to_string(),
        ));
    }
    let left = render_all(t, lhs)?;
    let mut alternatives = Vec::with_capacity(list.len());
    for item in list {
        let Expr::Tuple(rhs) = item else {
            return Err(DialectError::IllegalArgument(
                "tuple IN list items must be tuples".to_string(),
            ));
        };
        if rhs.len() != lhs.len() {
            return Err(DialectError::IllegalArgument(format!(
                "cannot compare tuples of {} and {} elements",
                lhs.len(),
                rhs.len()
            )));
        }
        let right = render_all(t, rhs)?;
        alternatives.push(pairwise(&left, &right, "=", " and "));
    }
    let disjunction = parenthesized(&joined(&alternatives, " or "));
    if negated {
        t.append_sql("not ");
    }
    t.state_mut().append_fragment(&disjunction);
    Ok(())
}

/// `is [not] distinct from`, or its CASE emulation.
///
/// # Errors
///
/// Propagates rendering errors.
pub fn visit_distinct_from<T: SqlAstTranslator + ?Sized>(
    t: &mut T,
    left: &Expr,
    right: &Expr,
    negated: bool,
) -> Result<()> {
    if t.dialect().supports(Feature::DistinctFromPredicate) {
        t.visit_expr(left)?;
        t.append_sql(if negated {
            " is not distinct from "
        } else {
            " is distinct from "
        });
        return t.visit_expr(right);
    }
    let l = render_fragment(t, left)?;
    let r = render_fragment(t, right)?;
    let outcome = u8::from(!negated);
    let mut sql = Fragment::text("case when (");
    sql.push(&comparison(&l, "=", &r));
    sql.push_str(" or ");
    sql.push(&l);
    sql.push_str(" is null and ");
    sql.push(&r);
    sql.push_str(&format!(" is null) then 0 else 1 end = {outcome}"));
    t.state_mut().append_fragment(&sql);
    Ok(())
}

/// LIKE with the native case-insensitive operator when available, else
/// `lower(x) like lower(p)`.
///
/// # Errors
///
/// Propagates rendering errors.
pub fn visit_like_predicate<T: SqlAstTranslator + ?Sized>(
    t: &mut T,
    like: &LikePredicate,
) -> Result<()> {
    if !like.case_sensitive && !t.dialect().supports(Feature::CaseInsensitiveLike) {
        t.append_sql("lower(");
        t.visit_expr(&like.match_expr)?;
        t.append_sql(")");
        t.append_sql(if like.negated { " not like lower(" } else { " like lower(" });
        t.visit_expr(&like.pattern)?;
        t.append_sql(")");
        return render_like_escape(t, like);
    }
    t.visit_expr(&like.match_expr)?;
    render_like_operator(t, like);
    t.render_like_pattern(like)
}

/// ` [not] like ` or ` [not] <case-insensitive keyword> `.
pub fn render_like_operator<T: SqlAstTranslator + ?Sized>(t: &mut T, like: &LikePredicate) {
    if like.negated {
        t.append_sql(" not");
    }
    if like.case_sensitive {
        t.append_sql(" like ");
    } else {
        let keyword = t.dialect().case_insensitive_like();
        t.append_sql(" ");
        t.append_sql(keyword);
        t.append_sql(" ");
    }
}

/// The pattern followed by [`render_like_escape`].
///
/// # Errors
///
/// Propagates rendering errors.
pub fn render_like_pattern<T: SqlAstTranslator + ?Sized>(
    t: &mut T,
    like: &LikePredicate,
) -> Result<()> {
    t.visit_expr(&like.pattern)?;
    render_like_escape(t, like)
}

/// ` escape <e>`, or ` escape ''` to switch off PostgreSQL's implicit
/// backslash escape.
///
/// # Errors
///
/// Propagates rendering errors.
pub fn render_like_escape<T: SqlAstTranslator + ?Sized>(
    t: &mut T,
    like: &LikePredicate,
) -> Result<()> {
    match &like.escape {
        Some(escape) => {
            t.append_sql(" escape ");
            t.visit_expr(escape)
        }
        None => {
            t.append_sql(" escape ''");
            Ok(())
        }
    }
}

/// A function call rendered through the dialect's registry.
///
/// A FILTER clause is kept when the backend supports it, otherwise every
/// argument is wrapped in `case when <filter> then <arg> else null end`.
///
/// # Errors
///
/// Fails for unknown functions and arity mismatches.
pub fn visit_function<T: SqlAstTranslator + ?Sized>(
    t: &mut T,
    function: &FunctionCall,
) -> Result<()> {
    let native_filter = t.dialect().supports(Feature::FilterClause);
    let filter = match &function.filter {
        Some(condition) => Some(render_fragment(t, condition)?),
        None => None,
    };
    let mut args = Vec::with_capacity(function.args.len());
    for arg in &function.args {
        let rendered = match (&filter, native_filter) {
            (Some(condition), false) => {
                let value = if matches!(arg, Expr::Wildcard { .. }) {
                    Fragment::text("1")
                } else {
                    render_fragment(t, arg)?
                };
                let mut wrapped = Fragment::text("case when ");
                wrapped.push(condition);
                wrapped.push_str(" then ");
                wrapped.push(&value);
                wrapped.push_str(" else null end");
                wrapped
            }
            _ => render_fragment(t, arg)?,
        };
        args.push(rendered);
    }
    if function.distinct {
        if let Some(first) = args.first_mut() {
            first.sql.insert_str(0, "distinct ");
        }
    }
    let mut sql = t
        .dialect()
        .function_registry()
        .render_fragments(&function.name, &args)?;
    if let (Some(condition), true) = (&filter, native_filter) {
        sql.push_str(" filter (where ");
        sql.push(condition);
        sql.push_str(")");
    }
    t.state_mut().append_fragment(&sql);
    Ok(())
}
