//! Pessimistic locking requests and the locking capabilities of a backend.

use std::time::Duration;

/// Millisecond value conventionally meaning "wait forever".
pub const WAIT_FOREVER_MILLIS: i32 = -1;
/// Millisecond value conventionally meaning "no wait".
pub const NO_WAIT_MILLIS: i32 = 0;
/// Millisecond value conventionally meaning "skip locked rows".
pub const SKIP_LOCKED_MILLIS: i32 = -2;

/// Lock strength requested for the selected rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockMode {
    /// Shared (read) lock.
    Read,
    /// Exclusive (write) lock.
    Write,
}

/// What to do when a requested row lock is held by someone else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LockTimeout {
    /// Block until the lock is granted.
    #[default]
    WaitForever,
    /// Fail immediately.
    NoWait,
    /// Skip rows that are locked.
    SkipLocked,
    /// Wait at most the given duration.
    After(Duration),
}

impl LockTimeout {
    /// Interprets the conventional millisecond encoding.
    ///
    /// `-1` waits forever, `0` is no-wait, `-2` skips locked rows, positive
    /// values are real timeouts. Any other negative value waits forever.
    #[must_use]
    pub fn from_millis(millis: i32) -> Self {
        match millis {
            NO_WAIT_MILLIS => Self::NoWait,
            SKIP_LOCKED_MILLIS => Self::SkipLocked,
            m if m > 0 => Self::After(Duration::from_millis(u64::from(m.unsigned_abs()))),
            _ => Self::WaitForever,
        }
    }

    /// Returns whether this is a real (positive) timeout.
    #[must_use]
    pub const fn is_real_timeout(&self) -> bool {
        matches!(self, Self::After(_))
    }
}

/// How pessimistic locks are requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PessimisticLockStyle {
    /// A clause appended to the query (`for update`).
    Clause,
    /// A table hint.
    TableHint,
    /// Not supported at all.
    None,
}

/// How individual rows are identified in a lock clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowLockStrategy {
    /// `for update of <columns>`.
    Column,
    /// `for update of <tables>`.
    Table,
    /// No row lock targets.
    None,
}

/// Whether lock timeouts can be expressed in the query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockTimeoutType {
    /// Timeouts are part of the query text.
    Query,
    /// Timeouts are set on the connection.
    Connection,
    /// No lock timeouts.
    None,
}

/// Which sides of an outer join a lock clause covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OuterJoinLockingType {
    /// Locks every joined table.
    Full,
    /// Locks only the root table.
    Identified,
    /// Outer joins cannot be locked.
    Unsupported,
}

/// Whether the lock timeout can be set on the connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionLockTimeoutStrategy {
    /// A session setting controls the timeout.
    Query,
    /// Not supported.
    None,
}

/// The locking capabilities of a backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockingSupport {
    /// Lock request style.
    pub lock_style: PessimisticLockStyle,
    /// Row lock targets.
    pub row_lock_strategy: RowLockStrategy,
    /// Lock timeout support.
    pub timeout_type: LockTimeoutType,
    /// Outer-join locking.
    pub outer_join_locking: OuterJoinLockingType,
    /// Connection-level lock timeouts.
    pub connection_timeout: ConnectionLockTimeoutStrategy,
}

impl LockingSupport {
    /// PostgreSQL: `for update of <tables>` with `nowait`/`skip locked` in the
    /// query and `lock_timeout` on the connection.
    #[must_use]
    pub const fn postgres() -> Self {
        Self {
            lock_style: PessimisticLockStyle::Clause,
            row_lock_strategy: RowLockStrategy::Table,
            timeout_type: LockTimeoutType::Query,
            outer_join_locking: OuterJoinLockingType::Identified,
            connection_timeout: ConnectionLockTimeoutStrategy::Query,
        }
    }

    /// A plain lock clause without row targets or timeouts.
    #[must_use]
    pub const fn clause_only() -> Self {
        Self {
            lock_style: PessimisticLockStyle::Clause,
            row_lock_strategy: RowLockStrategy::None,
            timeout_type: LockTimeoutType::None,
            outer_join_locking: OuterJoinLockingType::Full,
            connection_timeout: ConnectionLockTimeoutStrategy::None,
        }
    }
}
