//! Statement rendering on Spanner.

mod common;
use common::*;

use dialect_sql_core::ast::{
    Cte, CteMaterialization, DeleteStatement, Expr, FunctionCall, InsertSource, InsertStatement,
    JoinType, LikePredicate, LockClause, NamedTable, OrderBy, SelectColumn, SelectStatement,
    Statement, TableRef, UpdateAssignment, UpdateStatement, WindowSpec, WithClause,
};
use dialect_sql_core::dialect::Feature;
use dialect_sql_core::lock::{LockMode, LockTimeout};
use dialect_sql_core::translate::LikeEscapePolicy;
use dialect_sql_core::DialectError;

// ===================================================================
// LIKE
// ===================================================================

#[test]
fn like_without_backslashes_is_unchanged() {
    let dialect = spanner();
    for pattern in ["a%", "_b_", "100%", "x/y%", ""] {
        let like = LikePredicate::new(Expr::column("name"), Expr::string(pattern));
        assert_eq!(
            render_like(&dialect, like),
            format!("name like '{pattern}'"),
            "pattern {pattern:?}"
        );
    }
}

#[test]
fn like_backslashes_are_doubled() {
    let dialect = spanner();
    let like = LikePredicate::new(Expr::column("path"), Expr::string("c:\\dir\\%"));
    assert_eq!(render_like(&dialect, like), "path like 'c:\\\\dir\\\\%'");
}

#[test]
fn like_parameter_pattern_is_wrapped_in_replace() {
    let dialect = spanner();
    let like = LikePredicate::new(Expr::column("path"), Expr::Parameter);
    assert_eq!(
        render_like(&dialect, like),
        "path like replace(?,'\\','\\\\')"
    );
}

#[test]
fn like_omit_escape_clause_policy() {
    let dialect = spanner_with_policy(LikeEscapePolicy::OmitEscapeClause);
    let like = LikePredicate::new(Expr::column("path"), Expr::string("c:\\%"));
    assert_eq!(render_like(&dialect, like), "path like 'c:\\%'");
    let like = LikePredicate::new(Expr::column("path"), Expr::Parameter);
    assert_eq!(render_like(&dialect, like), "path like ?");
}

#[test]
fn case_insensitive_like_always_uses_ilike() {
    let dialect = spanner();
    for negated in [false, true] {
        let mut like = LikePredicate::new(Expr::column("name"), Expr::string("A%")).case_insensitive();
        like.negated = negated;
        let sql = render_like(&dialect, like);
        assert!(sql.contains(" ilike "), "{sql}");
        assert!(!sql.contains(" like "), "{sql}");
        assert!(!sql.contains("lower("), "{sql}");
    }
}

#[test]
fn negation_follows_the_match_expression() {
    let dialect = spanner();
    let cases = [
        (false, false, false, "name like 'a!%'"),
        (true, false, false, "name not like 'a!%'"),
        (false, true, false, "name ilike 'a!%'"),
        (true, true, false, "name not ilike 'a!%'"),
        (false, false, true, "name like 'a!%' escape '!'"),
        (true, false, true, "name not like 'a!%' escape '!'"),
        (false, true, true, "name ilike 'a!%' escape '!'"),
        (true, true, true, "name not ilike 'a!%' escape '!'"),
    ];
    for (negated, insensitive, escaped, expected) in cases {
        let mut like = LikePredicate::new(Expr::column("name"), Expr::string("a!%"));
        like.negated = negated;
        like.case_sensitive = !insensitive;
        if escaped {
            like = like.escape(Expr::string("!"));
        }
        assert_eq!(render_like(&dialect, like), expected);
    }
}

// ===================================================================
// CTEs
// ===================================================================

#[test]
fn materialization_hint_renders_nothing() {
    let dialect = spanner();
    for hint in [
        CteMaterialization::Materialized,
        CteMaterialization::NotMaterialized,
    ] {
        let select = SelectStatement {
            with: Some(WithClause {
                recursive: false,
                ctes: vec![Cte::new("recent", select(&["id"], "orders")).materialization(hint)],
            }),
            ..select(&["id"], "recent")
        };
        assert_eq!(
            render(&dialect, &Statement::Select(select)),
            "with recent as (select id from orders) select id from recent"
        );
    }
}

#[test]
fn recursive_and_dml_ctes_are_refused() {
    let dialect = spanner();
    let recursive = SelectStatement {
        with: Some(WithClause {
            recursive: true,
            ctes: vec![Cte::new("tree", select(&["id"], "nodes"))],
        }),
        ..select(&["id"], "tree")
    };
    assert!(matches!(
        render_err(&dialect, &Statement::Select(recursive)),
        DialectError::UnsupportedCapability { dialect, .. } if dialect == "spanner_postgresql"
    ));
    let delete = Statement::Delete(DeleteStatement {
        with: Some(WithClause {
            recursive: false,
            ctes: vec![Cte::new("stale", select(&["id"], "sessions"))],
        }),
        target: NamedTable::new("sessions"),
        where_clause: None,
    });
    assert!(matches!(
        render_err(&dialect, &delete),
        DialectError::UnsupportedCapability { feature, .. }
            if feature == Feature::NonQueryWithCte.as_str()
    ));
}

// ===================================================================
// DML
// ===================================================================

#[test]
fn update_from_clause_is_dropped() {
    let dialect = spanner();
    let update = Statement::Update(UpdateStatement {
        with: None,
        target: NamedTable::new("orders").alias("o"),
        assignments: vec![UpdateAssignment::new("total", Expr::Parameter)],
        from: vec![TableRef::aliased("products", "p")],
        where_clause: Some(Expr::qualified_column("o", "id").eq(Expr::Parameter)),
    });
    let out = translate(&dialect, &update);
    assert_eq!(out.sql, "update orders o set total = ? where o.id = ?");
    assert_eq!(out.parameter_count, 2);
    assert_eq!(out.affected_tables.len(), 1);
    assert_eq!(out.affected_tables[0].offset, "update orders".len());
}

#[test]
fn insert_target_is_registered_before_alias() {
    let dialect = spanner();
    let insert = Statement::Insert(InsertStatement {
        with: None,
        target: NamedTable::new("users").schema("app").alias("u"),
        columns: vec!["id".to_string()],
        values: InsertSource::Values(vec![vec![Expr::Parameter]]),
    });
    let out = translate(&dialect, &insert);
    assert_eq!(out.sql, "insert into app.users u (id) values (?)");
    assert_eq!(out.affected_tables[0].name, "app.users");
    assert_eq!(out.affected_tables[0].offset, "insert into app.users".len());
}

#[test]
fn delete_target_is_registered_before_alias() {
    let dialect = spanner();
    let delete = Statement::Delete(DeleteStatement {
        with: None,
        target: NamedTable::new("sessions").alias("s"),
        where_clause: Some(Expr::qualified_column("s", "expired").eq(Expr::boolean(true))),
    });
    let out = translate(&dialect, &delete);
    assert_eq!(out.sql, "delete from sessions s where s.expired = true");
    assert_eq!(out.affected_tables[0].offset, "delete from sessions".len());
    assert_eq!(
        out.affected_table_names().into_iter().collect::<Vec<_>>(),
        vec!["sessions"]
    );
}

// ===================================================================
// Everything else falls through to the standard renderer
// ===================================================================

#[test]
fn tuples_are_expanded() {
    let dialect = spanner();
    let left = Expr::tuple(vec![Expr::column("a"), Expr::column("b")]);
    let right = Expr::tuple(vec![Expr::integer(1), Expr::integer(2)]);
    assert_eq!(
        render_predicate(&dialect, left.clone().eq(right.clone())),
        "(a = 1 and b = 2)"
    );
    assert_eq!(
        render_predicate(&dialect, left.gt(right)),
        "(a > 1 or a = 1 and b > 2)"
    );
}

#[test]
fn distinct_from_is_emulated() {
    assert_eq!(
        render_predicate(&spanner(), Expr::column("a").is_distinct_from(Expr::Parameter)),
        "case when (a = ? or a is null and ? is null) then 0 else 1 end = 1"
    );
}

#[test]
fn emulations_bind_every_repeated_parameter() {
    let dialect = spanner();
    let out = translate(
        &dialect,
        &select_where("t", Expr::column("a").is_distinct_from(Expr::Parameter)),
    );
    assert_eq!(out.parameter_count, 2);

    let left = Expr::tuple(vec![Expr::column("a"), Expr::column("b")]);
    let right = Expr::tuple(vec![Expr::Parameter, Expr::Parameter]);
    let out = translate(&dialect, &select_where("t", left.lt(right)));
    assert_eq!(out.sql, "select * from t where (a < ? or a = ? and b < ?)");
    assert_eq!(out.parameter_count, 3);
}

#[test]
fn filter_clause_is_emulated() {
    let count = FunctionCall::new("count", vec![Expr::Wildcard { table: None }])
        .filter(Expr::column("paid").eq(Expr::boolean(true)));
    let statement = Statement::Select(SelectStatement::new(
        vec![SelectColumn::new(Expr::Function(count))],
        Some(TableRef::table("orders")),
    ));
    assert_eq!(
        render(&spanner(), &statement),
        "select count(case when paid = true then 1 else null end) from orders"
    );
}

#[test]
fn spanner_functions_are_used() {
    let select = SelectStatement::new(
        vec![
            SelectColumn::new(Expr::function(
                "locate",
                vec![Expr::string("@"), Expr::column("email")],
            )),
            SelectColumn::new(Expr::function("array_length", vec![Expr::column("tags")])),
        ],
        Some(TableRef::table("users")),
    );
    assert_eq!(
        render(&spanner(), &Statement::Select(select)),
        "select strpos(email, '@'), array_length(tags, 1) from users"
    );
    let statement = select_where(
        "t",
        Expr::function("generate_series", vec![Expr::integer(1)]).eq(Expr::integer(1)),
    );
    assert!(matches!(
        render_err(&spanner(), &statement),
        DialectError::UnknownFunction(name) if name == "generate_series"
    ));
}

#[test]
fn lateral_and_partition_by_are_refused() {
    let dialect = spanner();
    let from = TableRef::table("users").join_lateral(
        JoinType::Cross,
        TableRef::Subquery {
            query: Box::new(select(&["id"], "orders")),
            alias: "o".to_string(),
        },
        None,
    );
    let lateral = Statement::Select(SelectStatement::new(
        vec![SelectColumn::new(Expr::column("id"))],
        Some(from),
    ));
    assert!(matches!(
        render_err(&dialect, &lateral),
        DialectError::UnsupportedCapability { feature, .. } if feature == "lateral"
    ));
    let window = Expr::Window {
        function: FunctionCall::new("sum", vec![Expr::column("amount")]),
        window: WindowSpec {
            partition_by: vec![Expr::column("user_id")],
            order_by: vec![OrderBy::asc(Expr::column("created"))],
        },
    };
    let statement = Statement::Select(SelectStatement::new(
        vec![SelectColumn::new(window)],
        Some(TableRef::table("orders")),
    ));
    assert!(matches!(
        render_err(&dialect, &statement),
        DialectError::UnsupportedCapability { .. }
    ));
}

#[test]
fn read_lock_renders_for_update() {
    let statement = Statement::Select(SelectStatement {
        lock: Some(LockClause {
            mode: LockMode::Read,
            timeout: LockTimeout::WaitForever,
        }),
        ..select(&["id"], "users")
    });
    assert_eq!(
        render(&spanner(), &statement),
        "select id from users for update"
    );
}

#[test]
fn refused_lock_fails_the_translation() {
    let statement = Statement::Select(SelectStatement {
        lock: Some(LockClause {
            mode: LockMode::Write,
            timeout: LockTimeout::SkipLocked,
        }),
        ..select(&["id"], "users")
    });
    assert!(matches!(
        render_err(&spanner(), &statement),
        DialectError::UnsupportedCapability { .. }
    ));
}
