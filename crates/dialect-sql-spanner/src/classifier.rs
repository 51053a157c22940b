//! Classification of Spanner failures into constraint violations.
//!
//! Spanner's PostgreSQL interface reports most integrity failures with a
//! gRPC status code and free text, and no usable SQLSTATE. Codes are stable
//! and checked first. Messages are matched against a fixed, ordered list of
//! phrases, most specific first.

use dialect_sql_core::{BackendFailure, ConstraintKind, ConstraintViolation};

/// gRPC `ALREADY_EXISTS`.
pub const ALREADY_EXISTS: i32 = 6;

/// gRPC `OUT_OF_RANGE`, raised for failed check constraints.
pub const OUT_OF_RANGE: i32 = 11;

struct PhrasePattern {
    /// Must occur in the message.
    required: &'static str,
    /// At least one must also occur, when non-empty.
    qualifiers: &'static [&'static str],
    kind: ConstraintKind,
}

impl PhrasePattern {
    fn matches(&self, message: &str) -> bool {
        message.contains(self.required)
            && (self.qualifiers.is_empty() || self.qualifiers.iter().any(|q| message.contains(q)))
    }
}

const PHRASES: &[PhrasePattern] = &[
    PhrasePattern {
        required: "Cannot specify a null value for column",
        qualifiers: &[],
        kind: ConstraintKind::NotNull,
    },
    PhrasePattern {
        required: "does not specify a non-null value for NOT NULL column",
        qualifiers: &[],
        kind: ConstraintKind::NotNull,
    },
    PhrasePattern {
        required: "Check constraint",
        qualifiers: &[],
        kind: ConstraintKind::Check,
    },
    PhrasePattern {
        required: "Foreign key",
        qualifiers: &[
            " constraint violation on table",
            "constraint violation when deleting or updating referenced key",
        ],
        kind: ConstraintKind::ForeignKey,
    },
    PhrasePattern {
        required: "Unique index violation",
        qualifiers: &[],
        kind: ConstraintKind::Unique,
    },
    // Must stay last: every phrase above may contain it.
    PhrasePattern {
        required: "constraint violation",
        qualifiers: &[],
        kind: ConstraintKind::Unknown,
    },
];

fn kind_for_code(error_code: i32) -> Option<ConstraintKind> {
    match error_code {
        ALREADY_EXISTS => Some(ConstraintKind::Unique),
        OUT_OF_RANGE => Some(ConstraintKind::Check),
        _ => None,
    }
}

fn kind_for_message(message: &str) -> Option<ConstraintKind> {
    PHRASES
        .iter()
        .find(|pattern| pattern.matches(message))
        .map(|pattern| pattern.kind)
}

/// Maps a Spanner failure to a constraint violation.
///
/// Returns `None` when neither the code nor the message is recognized; the
/// caller then reports the original failure unchanged.
#[must_use]
pub fn classify(failure: &BackendFailure) -> Option<ConstraintViolation> {
    let kind = kind_for_code(failure.error_code)
        .or_else(|| kind_for_message(failure.message_or_empty()));
    tracing::debug!(
        error_code = failure.error_code,
        kind = kind.map(ConstraintKind::as_str),
        "Classified Spanner failure"
    );
    kind.map(|kind| ConstraintViolation::from_failure(kind, failure))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kind(code: i32, message: &str) -> Option<ConstraintKind> {
        classify(&BackendFailure::new(code, message)).map(|v| v.kind)
    }

    #[test]
    fn test_codes() {
        assert_eq!(kind(ALREADY_EXISTS, "Row [1] in table users already exists"), Some(ConstraintKind::Unique));
        assert_eq!(kind(OUT_OF_RANGE, ""), Some(ConstraintKind::Check));
    }

    #[test]
    fn test_code_wins_over_message() {
        assert_eq!(
            kind(ALREADY_EXISTS, "Check constraint `users`.`ck_age` is violated"),
            Some(ConstraintKind::Unique)
        );
    }

    #[test]
    fn test_generic_phrase_is_tried_last() {
        assert_eq!(
            kind(
                9,
                "Foreign key `fk_orders_users` constraint violation on table `orders`. \
                 Cannot find referenced values in users(id)."
            ),
            Some(ConstraintKind::ForeignKey)
        );
        assert_eq!(kind(9, "Some constraint violation"), Some(ConstraintKind::Unknown));
    }

    #[test]
    fn test_foreign_key_needs_qualifier() {
        assert_eq!(kind(2, "Foreign key fk_x is not valid"), None);
    }

    #[test]
    fn test_unrecognized() {
        assert_eq!(kind(0, "Table not found: users"), None);
        assert_eq!(classify(&BackendFailure::new(3, "")), None);
    }

    #[test]
    fn test_violation_keeps_diagnostics() {
        let failure = BackendFailure::new(ALREADY_EXISTS, "Row [1] in table users already exists")
            .with_sql("insert into users (id) values (1)");
        let violation = classify(&failure).unwrap();
        assert_eq!(violation.message, "Row [1] in table users already exists");
        assert_eq!(violation.error_code, ALREADY_EXISTS);
        assert_eq!(violation.sql.as_deref(), Some("insert into users (id) values (1)"));
    }
}
