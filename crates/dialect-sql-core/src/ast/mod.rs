//! Abstract Syntax Tree (AST) types for SQL statements.
//!
//! The AST is backend-agnostic: it is built once and handed to a dialect's
//! translator, which owns all decisions about the emitted text.

mod expression;
mod statement;

pub use expression::{BinaryOp, Expr, FunctionCall, LikePredicate, Literal, UnaryOp, WindowSpec};
pub use statement::{
    Cte, CteMaterialization, DeleteStatement, InsertSource, InsertStatement, JoinClause, JoinType,
    LockClause, NamedTable, OrderBy, OrderDirection, SelectColumn, SelectStatement, Statement,
    TableRef, UpdateAssignment, UpdateStatement, WithClause,
};
