use async_trait::async_trait;
use chrono::{DateTime, Utc};
use seatlock_types::ids::{EventId, LockId, SeatId, UserId};

use crate::error::LockError;

/// Result of a successful `acquire`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcquiredLock {
    pub lock_id: LockId,
    pub expires_at: DateTime<Utc>,
}

/// Result of a successful `extend`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtendedLock {
    pub new_expires_at: DateTime<Utc>,
}

/// The distributed seat-lock registry client.
///
/// Every mutating operation carries its full ownership predicate into the
/// store so there is no read-then-write race window: the client keeps no
/// local lock table, the registry is the single source of truth.
#[async_trait]
pub trait SeatLockRegistry: Send + Sync {
    /// Conditional put. Fails with [`LockError::AlreadyLocked`] iff a live
    /// (non-expired) entry already exists for `seat_id`.
    async fn acquire(
        &self,
        seat_id: SeatId,
        event_id: EventId,
        user_id: UserId,
    ) -> Result<AcquiredLock, LockError>;

    /// Conditional update setting `expires_at <- now + LOCK_TTL`. Fails with
    /// [`LockError::InvalidLock`] iff the entry is missing, expired, or owned
    /// by a different user/lock_id.
    async fn extend(
        &self,
        seat_id: SeatId,
        event_id: EventId,
        user_id: UserId,
        lock_id: LockId,
    ) -> Result<ExtendedLock, LockError>;

    /// Conditional delete. Fails with [`LockError::NotOwned`] iff no entry
    /// matches `user_id`+`lock_id` (already expired, released, or never
    /// held).
    async fn release(&self, seat_id: SeatId, user_id: UserId, lock_id: LockId) -> Result<(), LockError>;

    /// True iff a live entry exists for `seat_id`. Fail-closed: a transient
    /// registry error is reported as locked — better to hide an available
    /// seat than double-book it.
    async fn is_locked(&self, seat_id: SeatId) -> bool;

    /// True iff the current entry for `seat_id` matches both `user_id` and
    /// `lock_id` and has not expired. Fail-closed on registry errors, same
    /// rationale as `is_locked`: the caller (the commit coordinator) treats
    /// any `false` as "this lock can no longer be trusted".
    async fn validate(&self, seat_id: SeatId, user_id: UserId, lock_id: LockId) -> bool;

    /// Best-effort sweep deleting entries with `expires_at <= now`. Returns
    /// the number of entries removed. Correctness never depends on this
    /// running — the store's own TTL is authoritative.
    async fn reap_expired(&self) -> u64;
}
