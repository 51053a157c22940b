//! Sequence DDL and value retrieval.

use crate::error::{DialectError, Result};

/// Dialect-specific sequence syntax.
///
/// The defaults follow PostgreSQL.
pub trait SequenceSupport: Send + Sync {
    /// `create sequence` with no options.
    ///
    /// # Errors
    ///
    /// Returns an error when the backend cannot create sequences.
    fn create_sequence_string(&self, sequence_name: &str) -> Result<String> {
        Ok(format!("create sequence {sequence_name}"))
    }

    /// `create sequence` with an initial value and increment.
    ///
    /// # Errors
    ///
    /// Returns [`DialectError::Mapping`] when `increment_size` is 0.
    fn create_sequence_string_with(
        &self,
        sequence_name: &str,
        initial_value: i64,
        increment_size: i64,
    ) -> Result<String> {
        ensure_increment(sequence_name, increment_size)?;
        Ok(format!(
            "{}{} start with {initial_value} increment by {increment_size}",
            self.create_sequence_string(sequence_name)?,
            self.starting_value(initial_value, increment_size)
        ))
    }

    /// Statement restarting a sequence.
    fn restart_sequence_string(&self, sequence_name: &str, start_with: i64) -> String {
        format!("alter sequence {sequence_name} restart with {start_with}")
    }

    /// Expression fetching the next value.
    fn select_sequence_next_val_string(&self, sequence_name: &str) -> String {
        format!("nextval('{sequence_name}')")
    }

    /// Expression fetching the current value.
    ///
    /// # Errors
    ///
    /// Returns an error when the backend cannot read the current value.
    fn select_sequence_previous_val_string(&self, sequence_name: &str) -> Result<String> {
        Ok(format!("currval('{sequence_name}')"))
    }

    /// `drop sequence`.
    fn drop_sequence_string(&self, sequence_name: &str) -> String {
        format!("drop sequence if exists {sequence_name}")
    }

    /// Whether `minvalue`/`maxvalue` must sometimes accompany the start value.
    fn sometimes_needs_starting_value(&self) -> bool {
        false
    }

    /// Bound needed so that `initial_value` is a legal start value.
    fn starting_value(&self, initial_value: i64, increment_size: i64) -> String {
        if self.sometimes_needs_starting_value() {
            if increment_size > 0 && initial_value <= 0 {
                return format!(" minvalue {initial_value}");
            }
            if increment_size < 0 && initial_value >= 0 {
                return format!(" maxvalue {initial_value}");
            }
        }
        String::new()
    }
}

/// Rejects a zero increment.
///
/// # Errors
///
/// Returns [`DialectError::Mapping`] when `increment_size` is 0.
pub fn ensure_increment(sequence_name: &str, increment_size: i64) -> Result<()> {
    if increment_size == 0 {
        return Err(DialectError::Mapping(format!(
            "Unable to create the sequence [{sequence_name}]: the increment size must not be 0"
        )));
    }
    Ok(())
}

/// PostgreSQL sequence syntax.
#[derive(Debug, Default, Clone, Copy)]
pub struct PostgresSequenceSupport;

impl SequenceSupport for PostgresSequenceSupport {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_postgres_sequences() {
        let seq = PostgresSequenceSupport;
        assert_eq!(seq.create_sequence_string("s").unwrap(), "create sequence s");
        assert_eq!(
            seq.create_sequence_string_with("s", 1, 50).unwrap(),
            "create sequence s start with 1 increment by 50"
        );
        assert_eq!(
            seq.restart_sequence_string("s", 10),
            "alter sequence s restart with 10"
        );
        assert_eq!(seq.select_sequence_next_val_string("s"), "nextval('s')");
        assert_eq!(seq.drop_sequence_string("s"), "drop sequence if exists s");
    }

    #[test]
    fn test_zero_increment_rejected() {
        let err = PostgresSequenceSupport
            .create_sequence_string_with("s", 1, 0)
            .unwrap_err();
        assert!(matches!(err, DialectError::Mapping(msg) if msg.contains("[s]")));
    }
}
