//! Bit-reversed sequences.

use dialect_sql_core::sequence::{ensure_increment, SequenceSupport};
use dialect_sql_core::Result;

/// Spanner sequences are always `bit_reversed_positive` and count with
/// `start counter with` instead of `start with ... increment by`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SpannerSequenceSupport;

impl SequenceSupport for SpannerSequenceSupport {
    fn create_sequence_string(&self, sequence_name: &str) -> Result<String> {
        Ok(format!("create sequence {sequence_name} bit_reversed_positive"))
    }

    fn create_sequence_string_with(
        &self,
        sequence_name: &str,
        initial_value: i64,
        increment_size: i64,
    ) -> Result<String> {
        ensure_increment(sequence_name, increment_size)?;
        Ok(format!(
            "{}{} start counter with {initial_value}",
            self.create_sequence_string(sequence_name)?,
            self.starting_value(initial_value, increment_size)
        ))
    }

    fn restart_sequence_string(&self, sequence_name: &str, start_with: i64) -> String {
        format!("alter sequence {sequence_name} restart counter with {start_with}")
    }

    fn sometimes_needs_starting_value(&self) -> bool {
        true
    }
}
