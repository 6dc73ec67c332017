//! In-memory [`SeatLockRegistry`] used by `seatlock-core`'s unit tests so the
//! coordinator's orchestration logic can be exercised without a live Redis.

use async_trait::async_trait;
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use seatlock_types::ids::{EventId, LockId, SeatId, UserId};
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::Mutex;

use crate::error::LockError;
use crate::registry::{AcquiredLock, ExtendedLock, SeatLockRegistry};

#[derive(Debug, Clone)]
struct Entry {
    #[allow(dead_code)]
    event_id: EventId,
    user_id: UserId,
    lock_id: LockId,
    expires_at: DateTime<Utc>,
}

pub struct FakeSeatLockRegistry {
    entries: Mutex<HashMap<SeatId, Entry>>,
    ttl: Duration,
    /// Optional fixed clock for deterministic TTL-boundary tests. `None`
    /// uses the real wall clock.
    clock: Mutex<Option<DateTime<Utc>>>,
}

impl FakeSeatLockRegistry {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl,
            clock: Mutex::new(None),
        }
    }

    pub async fn set_clock(&self, at: DateTime<Utc>) {
        *self.clock.lock().await = Some(at);
    }

    async fn now(&self) -> DateTime<Utc> {
        self.clock.lock().await.unwrap_or_else(Utc::now)
    }
}

#[async_trait]
impl SeatLockRegistry for FakeSeatLockRegistry {
    async fn acquire(
        &self,
        seat_id: SeatId,
        event_id: EventId,
        user_id: UserId,
    ) -> Result<AcquiredLock, LockError> {
        let now = self.now().await;
        let mut entries = self.entries.lock().await;

        if let Some(existing) = entries.get(&seat_id) {
            if existing.expires_at > now {
                return Err(LockError::AlreadyLocked);
            }
        }

        let lock_id = LockId::new_v4();
        let expires_at = now + ChronoDuration::from_std(self.ttl).unwrap_or(ChronoDuration::zero());
        entries.insert(
            seat_id,
            Entry {
                event_id,
                user_id,
                lock_id,
                expires_at,
            },
        );

        Ok(AcquiredLock { lock_id, expires_at })
    }

    async fn extend(
        &self,
        seat_id: SeatId,
        _event_id: EventId,
        user_id: UserId,
        lock_id: LockId,
    ) -> Result<ExtendedLock, LockError> {
        let now = self.now().await;
        let mut entries = self.entries.lock().await;

        let Some(existing) = entries.get_mut(&seat_id) else {
            return Err(LockError::InvalidLock);
        };
        if existing.user_id != user_id || existing.lock_id != lock_id || existing.expires_at <= now {
            return Err(LockError::InvalidLock);
        }

        let new_expires_at = now + ChronoDuration::from_std(self.ttl).unwrap_or(ChronoDuration::zero());
        existing.expires_at = new_expires_at;
        Ok(ExtendedLock { new_expires_at })
    }

    async fn release(&self, seat_id: SeatId, user_id: UserId, lock_id: LockId) -> Result<(), LockError> {
        let mut entries = self.entries.lock().await;
        match entries.get(&seat_id) {
            Some(existing) if existing.user_id == user_id && existing.lock_id == lock_id => {
                entries.remove(&seat_id);
                Ok(())
            }
            _ => Err(LockError::NotOwned),
        }
    }

    async fn is_locked(&self, seat_id: SeatId) -> bool {
        let now = self.now().await;
        let entries = self.entries.lock().await;
        entries.get(&seat_id).is_some_and(|e| e.expires_at > now)
    }

    async fn validate(&self, seat_id: SeatId, user_id: UserId, lock_id: LockId) -> bool {
        let now = self.now().await;
        let entries = self.entries.lock().await;
        entries
            .get(&seat_id)
            .is_some_and(|e| e.user_id == user_id && e.lock_id == lock_id && e.expires_at > now)
    }

    async fn reap_expired(&self) -> u64 {
        let now = self.now().await;
        let mut entries = self.entries.lock().await;
        let before = entries.len();
        entries.retain(|_, e| e.expires_at > now);
        (before - entries.len()) as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration as StdDuration;

    #[tokio::test]
    async fn acquire_then_release_round_trips_to_empty() {
        let registry = FakeSeatLockRegistry::new(StdDuration::from_secs(300));
        let seat = SeatId::new_v4();
        let event = EventId::new_v4();
        let user = UserId::new_v4();

        let acquired = registry.acquire(seat, event, user).await.unwrap();
        assert!(registry.is_locked(seat).await);

        registry.release(seat, user, acquired.lock_id).await.unwrap();
        assert!(!registry.is_locked(seat).await);
    }

    #[tokio::test]
    async fn concurrent_acquire_has_exactly_one_winner() {
        let registry = FakeSeatLockRegistry::new(StdDuration::from_secs(300));
        let seat = SeatId::new_v4();
        let event = EventId::new_v4();
        let user_a = UserId::new_v4();
        let user_b = UserId::new_v4();

        let a = registry.acquire(seat, event, user_a).await;
        let b = registry.acquire(seat, event, user_b).await;

        assert!(a.is_ok());
        assert!(matches!(b, Err(LockError::AlreadyLocked)));
    }

    #[tokio::test]
    async fn expired_lock_can_be_reacquired_by_another_user() {
        let registry = FakeSeatLockRegistry::new(StdDuration::from_millis(300));
        let seat = SeatId::new_v4();
        let event = EventId::new_v4();
        let user_a = UserId::new_v4();
        let user_b = UserId::new_v4();

        let t0 = Utc::now();
        registry.set_clock(t0).await;
        registry.acquire(seat, event, user_a).await.unwrap();

        // Just before expiry: still locked.
        registry.set_clock(t0 + ChronoDuration::milliseconds(299)).await;
        assert!(registry.acquire(seat, event, user_b).await.is_err());

        // Just after expiry: lock is reclaimable.
        registry.set_clock(t0 + ChronoDuration::milliseconds(301)).await;
        let acquired_b = registry.acquire(seat, event, user_b).await.unwrap();
        assert!(registry.validate(seat, user_b, acquired_b.lock_id).await);
        assert!(!registry.validate(seat, user_a, LockId::new_v4()).await);
    }

    #[tokio::test]
    async fn reap_expired_removes_only_stale_entries() {
        let registry = FakeSeatLockRegistry::new(StdDuration::from_millis(100));
        let t0 = Utc::now();
        registry.set_clock(t0).await;

        let stale = SeatId::new_v4();
        registry.acquire(stale, EventId::new_v4(), UserId::new_v4()).await.unwrap();

        registry.set_clock(t0 + ChronoDuration::milliseconds(50)).await;
        let fresh = SeatId::new_v4();
        registry.acquire(fresh, EventId::new_v4(), UserId::new_v4()).await.unwrap();

        registry.set_clock(t0 + ChronoDuration::milliseconds(140)).await;
        let swept = registry.reap_expired().await;

        assert_eq!(swept, 1);
        assert!(registry.is_locked(fresh).await);
    }
}
