//! Zone offsets stored as a number of seconds.
//!
//! Spanner has no zone offset type; offsets go into a `bigint` column.

use chrono::FixedOffset;

/// Error reading a zone offset back from its stored value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ZoneOffsetError {
    /// The stored value does not fit in 32 bits.
    #[error("Zone offset value {0} is out of range")]
    OutOfRange(i64),

    /// The value fits but is not a valid offset (beyond +/-24h).
    #[error("Zone offset of {0} seconds is not a valid offset")]
    InvalidOffset(i32),
}

/// The stored value of `offset`: its total seconds east of UTC.
#[must_use]
pub fn offset_to_seconds(offset: FixedOffset) -> i64 {
    i64::from(offset.local_minus_utc())
}

/// Reads an offset back from its stored value.
///
/// # Errors
///
/// Returns [`ZoneOffsetError`] when `seconds` is outside the 32-bit range or
/// does not form a valid offset.
pub fn seconds_to_offset(seconds: i64) -> Result<FixedOffset, ZoneOffsetError> {
    let seconds = i32::try_from(seconds).map_err(|_| ZoneOffsetError::OutOfRange(seconds))?;
    FixedOffset::east_opt(seconds).ok_or(ZoneOffsetError::InvalidOffset(seconds))
}
