use async_trait::async_trait;
use seatlock_types::enums::InvalidationScope;
use seatlock_types::ids::EventId;

/// A one-way signal to the availability cache that an event's seat set
/// changed. Implementations may delete a cache entry synchronously or
/// publish a message; the commit coordinator never waits on ordering and
/// never retries a failed call. The durable store is always the
/// authoritative answer, so a dropped invalidation only delays cache
/// convergence, it never causes an incorrect booking.
#[async_trait]
pub trait CacheInvalidationHook: Send + Sync {
    async fn invalidate(&self, event_id: EventId, scope: InvalidationScope);
}

/// Default hook for tests and for deployments with no cache in front of the
/// core.
pub struct NoopInvalidationHook;

#[async_trait]
impl CacheInvalidationHook for NoopInvalidationHook {
    async fn invalidate(&self, _event_id: EventId, _scope: InvalidationScope) {}
}
