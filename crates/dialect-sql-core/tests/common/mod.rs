#![allow(dead_code)]

use dialect_sql_core::ast::{Expr, SelectColumn, SelectStatement, Statement, TableRef};
use dialect_sql_core::dialect::{postgres_functions, Capabilities, Dialect, Feature};
use dialect_sql_core::function::FunctionRegistry;
use dialect_sql_core::translate::{SqlAstTranslator, StandardTranslator, TranslatedStatement};
use dialect_sql_core::DialectError;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// PostgreSQL with some features switched off.
pub struct RestrictedDialect {
    capabilities: Capabilities,
    functions: FunctionRegistry,
}

impl RestrictedDialect {
    pub fn without(features: &[Feature]) -> Self {
        let overrides: Vec<(Feature, bool)> = features.iter().map(|f| (*f, false)).collect();
        Self {
            capabilities: Capabilities::postgres().with_overrides(&overrides),
            functions: postgres_functions(),
        }
    }
}

impl Dialect for RestrictedDialect {
    fn name(&self) -> &'static str {
        "restricted"
    }

    fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    fn function_registry(&self) -> &FunctionRegistry {
        &self.functions
    }

    fn translator(&self) -> Box<dyn SqlAstTranslator + '_> {
        Box::new(StandardTranslator::new(self))
    }
}

/// Sends the library's tracing output to the test harness. Only the first
/// call installs the subscriber.
pub fn init_tracing() {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::DEBUG)
        .with_target(false)
        .without_time()
        .with_test_writer()
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}

pub fn translate(dialect: &dyn Dialect, statement: &Statement) -> TranslatedStatement {
    init_tracing();
    dialect
        .translate(statement)
        .unwrap_or_else(|e| panic!("Failed to translate: {statement:?}\nError: {e}"))
}

pub fn render(dialect: &dyn Dialect, statement: &Statement) -> String {
    translate(dialect, statement).sql
}

pub fn render_err(dialect: &dyn Dialect, statement: &Statement) -> DialectError {
    init_tracing();
    dialect
        .translate(statement)
        .expect_err(&format!("Expected translation error for: {statement:?}"))
}

/// `select <columns> from <table>`.
pub fn select(columns: &[&str], table: &str) -> SelectStatement {
    SelectStatement::new(
        columns
            .iter()
            .map(|c| SelectColumn::new(Expr::column(*c)))
            .collect(),
        Some(TableRef::table(table)),
    )
}

/// `select * from <table> where <predicate>`.
pub fn select_where(table: &str, predicate: Expr) -> Statement {
    Statement::Select(SelectStatement {
        where_clause: Some(predicate),
        ..SelectStatement::new(
            vec![SelectColumn::new(Expr::Wildcard { table: None })],
            Some(TableRef::table(table)),
        )
    })
}

/// Renders `predicate` and strips the `select * from t where ` prefix.
pub fn render_predicate(dialect: &dyn Dialect, predicate: Expr) -> String {
    let sql = render(dialect, &select_where("t", predicate));
    sql.strip_prefix("select * from t where ")
        .unwrap_or_else(|| panic!("unexpected rendering: {sql}"))
        .to_string()
}
