//! Classification of Spanner failures, pinned to the backend's messages.

mod common;
use common::*;

use dialect_sql_core::{BackendFailure, ConstraintKind, Dialect};
use dialect_sql_spanner::classifier::{classify, ALREADY_EXISTS, OUT_OF_RANGE};

/// gRPC `FAILED_PRECONDITION`, the code most integrity failures carry.
const FAILED_PRECONDITION: i32 = 9;

fn kind(code: i32, message: &str) -> Option<ConstraintKind> {
    spanner()
        .classify_failure(&BackendFailure::new(code, message))
        .map(|v| v.kind)
}

#[test]
fn duplicate_row() {
    assert_eq!(
        kind(ALREADY_EXISTS, "Row [1] in table users already exists"),
        Some(ConstraintKind::Unique)
    );
}

#[test]
fn unique_index_violation() {
    assert_eq!(
        kind(
            FAILED_PRECONDITION,
            "Unique index violation on index uk_users_email at index key [a@b.c,1]. \
             It conflicts with row [1] in table users."
        ),
        Some(ConstraintKind::Unique)
    );
}

#[test]
fn not_null_messages() {
    assert_eq!(
        kind(
            FAILED_PRECONDITION,
            "Cannot specify a null value for column: users.email in table: users \
             referenced by key: {Int64(1)}"
        ),
        Some(ConstraintKind::NotNull)
    );
    assert_eq!(
        kind(
            FAILED_PRECONDITION,
            "A new row in table users does not specify a non-null value for NOT NULL \
             column: email"
        ),
        Some(ConstraintKind::NotNull)
    );
}

#[test]
fn check_constraint() {
    assert_eq!(
        kind(OUT_OF_RANGE, "Check constraint `users`.`ck_age` is violated for key (1)"),
        Some(ConstraintKind::Check)
    );
    assert_eq!(
        kind(
            FAILED_PRECONDITION,
            "Check constraint `users`.`ck_age` is violated for key (1)"
        ),
        Some(ConstraintKind::Check)
    );
}

#[test]
fn foreign_key_messages() {
    assert_eq!(
        kind(
            FAILED_PRECONDITION,
            "Foreign key `fk_orders_users` constraint violation on table `orders`. \
             Cannot find referenced values in users(id)."
        ),
        Some(ConstraintKind::ForeignKey)
    );
    assert_eq!(
        kind(
            FAILED_PRECONDITION,
            "Foreign key constraint `fk_orders_users` is violated on table `users`. \
             Foreign key constraint violation when deleting or updating referenced key"
        ),
        Some(ConstraintKind::ForeignKey)
    );
}

#[test]
fn code_wins_over_message() {
    assert_eq!(
        kind(
            ALREADY_EXISTS,
            "Check constraint `users`.`ck_age` is violated for key (1)"
        ),
        Some(ConstraintKind::Unique)
    );
    assert_eq!(
        kind(
            OUT_OF_RANGE,
            "Foreign key `fk` constraint violation on table `orders`."
        ),
        Some(ConstraintKind::Check)
    );
}

#[test]
fn specific_phrase_wins_over_generic() {
    let message = "Foreign key `fk_orders_users` constraint violation on table `orders`.";
    assert!(message.contains("constraint violation"));
    assert_eq!(kind(FAILED_PRECONDITION, message), Some(ConstraintKind::ForeignKey));
    assert_eq!(
        kind(FAILED_PRECONDITION, "Interleaved table constraint violation"),
        Some(ConstraintKind::Unknown)
    );
}

#[test]
fn unclassified_failures() {
    assert_eq!(kind(FAILED_PRECONDITION, "Table not found: user"), None);
    assert_eq!(kind(0, "Syntax error: Unexpected end of input"), None);
    // Matching is case-sensitive.
    assert_eq!(kind(0, "check constraint ck_age failed"), None);
    let failure = BackendFailure {
        error_code: 3,
        ..BackendFailure::default()
    };
    assert_eq!(classify(&failure), None);
}

#[test]
fn sql_state_is_ignored() {
    let failure = BackendFailure::new(0, "duplicate key").with_sql_state("23505");
    assert_eq!(spanner().classify_failure(&failure), None);
}

#[test]
fn violation_carries_diagnostics() {
    let failure = BackendFailure::new(
        FAILED_PRECONDITION,
        "Check constraint `users`.`ck_age` is violated for key (1)",
    )
    .with_sql("update users set age = ? where id = ?");
    let violation = spanner().classify_failure(&failure).unwrap();
    assert_eq!(violation.kind, ConstraintKind::Check);
    assert_eq!(violation.error_code, FAILED_PRECONDITION);
    assert_eq!(
        violation.sql.as_deref(),
        Some("update users set age = ? where id = ?")
    );
    assert_eq!(
        violation.to_string(),
        "Check constraint `users`.`ck_age` is violated for key (1)"
    );
}
