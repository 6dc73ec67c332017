use thiserror::Error;

/// Errors raised by [`crate::SeatLockRegistry`] operations.
#[derive(Debug, Error)]
pub enum LockError {
    /// `acquire` lost the conditional put: another caller holds a live lock.
    #[error("seat is already locked")]
    AlreadyLocked,

    /// `extend` predicate failed: the lock is expired, held by someone else,
    /// or never existed. The caller must not assume the lock is alive.
    #[error("lock is not valid or not owned by the caller")]
    InvalidLock,

    /// `release` predicate failed: no lock entry matched `user_id`+`lock_id`.
    #[error("lock is not held by the caller")]
    NotOwned,

    /// Registry unreachable, timed out, or returned a protocol error. Never
    /// retried inside the client; the caller may retry.
    #[error("lock registry is unavailable: {0}")]
    Transient(String),
}
