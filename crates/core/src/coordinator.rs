use std::sync::Arc;

use chrono::Utc;
use seatlock_cache::CacheInvalidationHook;
use seatlock_db::models::{Booking, BookingSeat};
use seatlock_db::queries::{bookings, events, seats};
use seatlock_db::Pool;
use seatlock_lock::SeatLockRegistry;
use seatlock_types::enums::InvalidationScope;
use seatlock_types::ids::{BookingId, EventId, LockId, SeatId, UserId};
use uuid::Uuid;

use crate::error::CommitError;
use crate::pricing;

/// Input to [`BookingCommitCoordinator::commit`]: one lock per desired seat,
/// pairwise matched by index with `seat_ids`.
#[derive(Debug, Clone)]
pub struct CommitRequest {
    pub user_id: UserId,
    pub event_id: EventId,
    pub seat_ids: Vec<SeatId>,
    pub lock_ids: Vec<LockId>,
    pub payment_intent_id: Option<String>,
}

/// A freshly committed booking together with its seat rows, so callers don't
/// need a second round-trip to report `seat_ids`.
#[derive(Debug, Clone)]
pub struct CommittedBooking {
    pub booking: Booking,
    pub seats: Vec<BookingSeat>,
}

/// Orchestrates lock validation, the transactional commit, best-effort lock
/// release, and cache invalidation. Holds no long-lived state of its own —
/// every call borrows a fresh transaction from the pool.
pub struct BookingCommitCoordinator {
    registry: Arc<dyn SeatLockRegistry>,
    pool: Pool,
    cache: Arc<dyn CacheInvalidationHook>,
}

impl BookingCommitCoordinator {
    pub fn new(registry: Arc<dyn SeatLockRegistry>, pool: Pool, cache: Arc<dyn CacheInvalidationHook>) -> Self {
        Self { registry, pool, cache }
    }

    pub async fn commit(&self, request: CommitRequest) -> Result<CommittedBooking, CommitError> {
        if request.seat_ids.is_empty()
            || request.seat_ids.len() != request.lock_ids.len()
            || has_duplicates(&request.seat_ids)
        {
            return Err(CommitError::InvalidRequest);
        }

        // Step 1: pre-validate locks outside the transaction, in parallel.
        // An optimisation only — the authoritative check is step 5.
        let pre_checks = request
            .seat_ids
            .iter()
            .zip(request.lock_ids.iter())
            .map(|(&seat_id, &lock_id)| self.registry.validate(seat_id, request.user_id, lock_id));
        let pre_results = futures::future::join_all(pre_checks).await;
        if pre_results.iter().any(|valid| !valid) {
            return Err(CommitError::InvalidLocks);
        }

        // Step 2: open the transaction.
        let mut tx = self.pool.begin().await?;

        // Step 3: load and lock the event row.
        let event = events::find_for_update(&mut tx, request.event_id)
            .await?
            .ok_or(CommitError::EventNotFound)?;
        if !event.can_purchase_tickets(Utc::now()) {
            tx.rollback().await.ok();
            return Err(CommitError::SalesClosed);
        }

        // Step 4: load and lock the seat rows, in a deterministic order so
        // two commits over overlapping seat sets can't deadlock.
        let mut sorted_seat_ids = request.seat_ids.clone();
        sorted_seat_ids.sort();
        let seat_rows = seats::find_many_for_update(&mut tx, &sorted_seat_ids).await?;
        if seat_rows.len() != request.seat_ids.len() {
            tx.rollback().await.ok();
            return Err(CommitError::SeatsNotFound);
        }
        if seat_rows.iter().any(|s| s.status != "available") {
            tx.rollback().await.ok();
            return Err(CommitError::SeatsNotAvailable);
        }

        // Step 5: re-validate locks inside the transaction. Narrows the race
        // window to the registry-read/commit gap, bounded by this
        // transaction's duration rather than the full lock TTL.
        let re_checks = request
            .seat_ids
            .iter()
            .zip(request.lock_ids.iter())
            .map(|(&seat_id, &lock_id)| self.registry.validate(seat_id, request.user_id, lock_id));
        let re_results = futures::future::join_all(re_checks).await;
        if re_results.iter().any(|valid| !valid) {
            tx.rollback().await.ok();
            return Err(CommitError::InvalidLocks);
        }

        // Step 6: compute pricing, preserving the caller's seat order so
        // booking-seat rows line up with the request.
        let modifiers: Vec<_> = request
            .seat_ids
            .iter()
            .map(|id| {
                seat_rows
                    .iter()
                    .find(|s| &s.id == id)
                    .expect("seat_ids and seat_rows cover the same set")
                    .price_modifier
            })
            .collect();
        let total_price = pricing::price_seats(event.base_price, &modifiers);

        // Step 7: insert the booking, carrying the payment intent verbatim.
        let booking = bookings::insert_booking(
            &mut tx,
            request.user_id,
            request.event_id,
            total_price,
            request.payment_intent_id.as_deref(),
        )
        .await?;

        // Step 8: insert one booking-seat row per seat.
        let seat_prices: Vec<(Uuid, _)> = request
            .seat_ids
            .iter()
            .zip(modifiers.iter())
            .map(|(&seat_id, &modifier)| (seat_id, pricing::price_seat(event.base_price, modifier)))
            .collect();
        let booking_seats = bookings::insert_booking_seats(&mut tx, booking.id, &seat_prices).await?;

        // Step 9: conditionally decrement inventory. Zero rows affected
        // means capacity drifted out from under valid locks — a
        // configuration mismatch, not a normal race, and must be surfaced.
        let affected = events::decrement_available_seats(&mut tx, request.event_id, request.seat_ids.len() as i32)
            .await?;
        if affected == 0 {
            tracing::warn!(event_id = %request.event_id, "inventory decrement affected zero rows after locks validated");
            tx.rollback().await.ok();
            return Err(CommitError::SalesClosed);
        }

        // Step 10: mark the seats sold.
        seats::update_status_batch(&mut tx, &request.seat_ids, "booked").await?;

        // Step 11: commit.
        tx.commit().await?;

        // Step 12: best-effort post-commit side effects. Neither releasing a
        // lock nor invalidating the cache can roll back a committed booking.
        for (&seat_id, &lock_id) in request.seat_ids.iter().zip(request.lock_ids.iter()) {
            if let Err(err) = self.registry.release(seat_id, request.user_id, lock_id).await {
                tracing::warn!(%seat_id, %lock_id, error = %err, "post-commit lock release failed, relying on TTL");
            }
        }
        self.cache
            .invalidate(request.event_id, InvalidationScope::SeatAvailability)
            .await;

        Ok(CommittedBooking {
            booking,
            seats: booking_seats,
        })
    }

    pub async fn confirm(&self, booking_id: BookingId, payment_intent_id: &str) -> Result<Booking, CommitError> {
        let mut tx = self.pool.begin().await?;

        let booking = bookings::find_for_update(&mut tx, booking_id)
            .await?
            .ok_or(CommitError::BookingNotFound)?;

        if booking.status != "pending" {
            tx.rollback().await.ok();
            return Err(CommitError::InvalidStatus);
        }
        if let Some(stored) = booking.payment_intent_id.as_deref() {
            if stored != payment_intent_id {
                tx.rollback().await.ok();
                return Err(CommitError::InvalidStatus);
            }
        }

        let confirmed = bookings::mark_confirmed(&mut tx, booking_id, payment_intent_id).await?;
        tx.commit().await?;

        self.cache
            .invalidate(confirmed.event_id, InvalidationScope::EventMeta)
            .await;

        Ok(confirmed)
    }

    pub async fn cancel(
        &self,
        booking_id: BookingId,
        user_id: UserId,
        reason: Option<&str>,
    ) -> Result<Booking, CommitError> {
        let mut tx = self.pool.begin().await?;

        let booking = bookings::find_for_update(&mut tx, booking_id)
            .await?
            .ok_or(CommitError::BookingNotFound)?;

        if booking.user_id != user_id {
            tx.rollback().await.ok();
            return Err(CommitError::BookingNotFound);
        }
        if booking.status == "cancelled" {
            tx.rollback().await.ok();
            return Err(CommitError::AlreadyCancelled);
        }
        if booking.status == "refunded" {
            tx.rollback().await.ok();
            return Err(CommitError::InvalidStatus);
        }

        let seat_rows = bookings::list_seats_for_booking_tx(&mut tx, booking_id).await?;
        let seat_ids: Vec<Uuid> = seat_rows.iter().map(|s| s.seat_id).collect();

        let cancelled = bookings::mark_cancelled(&mut tx, booking_id, reason).await?;
        seats::update_status_batch(&mut tx, &seat_ids, "available").await?;
        events::increment_available_seats(&mut tx, booking.event_id, seat_ids.len() as i32).await?;

        tx.commit().await?;

        self.cache
            .invalidate(cancelled.event_id, InvalidationScope::SeatAvailability)
            .await;

        Ok(cancelled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use seatlock_cache::NoopInvalidationHook;
    use seatlock_lock::FakeSeatLockRegistry;
    use sqlx::postgres::PgPoolOptions;
    use std::time::Duration as StdDuration;

    /// Builds a coordinator backed by a pool that never actually connects.
    /// Safe as long as the test only exercises the precondition checks that
    /// return before the first `self.pool.begin()` call.
    fn coordinator_with_unreachable_store(registry: FakeSeatLockRegistry) -> BookingCommitCoordinator {
        let pool = PgPoolOptions::new().connect_lazy("postgres://unreachable/db").unwrap();
        BookingCommitCoordinator::new(Arc::new(registry), pool, Arc::new(NoopInvalidationHook))
    }

    #[tokio::test]
    async fn commit_rejects_empty_seat_list() {
        let coordinator = coordinator_with_unreachable_store(FakeSeatLockRegistry::new(StdDuration::from_secs(300)));

        let result = coordinator
            .commit(CommitRequest {
                user_id: Uuid::new_v4(),
                event_id: Uuid::new_v4(),
                seat_ids: vec![],
                lock_ids: vec![],
                payment_intent_id: None,
            })
            .await;

        assert!(matches!(result, Err(CommitError::InvalidRequest)));
    }

    #[tokio::test]
    async fn commit_rejects_mismatched_seat_and_lock_counts() {
        let coordinator = coordinator_with_unreachable_store(FakeSeatLockRegistry::new(StdDuration::from_secs(300)));

        let result = coordinator
            .commit(CommitRequest {
                user_id: Uuid::new_v4(),
                event_id: Uuid::new_v4(),
                seat_ids: vec![Uuid::new_v4(), Uuid::new_v4()],
                lock_ids: vec![Uuid::new_v4()],
                payment_intent_id: None,
            })
            .await;

        assert!(matches!(result, Err(CommitError::InvalidRequest)));
    }

    #[tokio::test]
    async fn commit_rejects_duplicate_seat_ids() {
        let coordinator = coordinator_with_unreachable_store(FakeSeatLockRegistry::new(StdDuration::from_secs(300)));
        let seat = Uuid::new_v4();

        let result = coordinator
            .commit(CommitRequest {
                user_id: Uuid::new_v4(),
                event_id: Uuid::new_v4(),
                seat_ids: vec![seat, seat],
                lock_ids: vec![Uuid::new_v4(), Uuid::new_v4()],
                payment_intent_id: None,
            })
            .await;

        assert!(matches!(result, Err(CommitError::InvalidRequest)));
    }

    #[tokio::test]
    async fn commit_rejects_unvalidated_locks_before_opening_a_transaction() {
        // No lock was ever acquired in the registry, so pre-validation in
        // step 1 must fail and the coordinator must never touch the pool.
        let coordinator = coordinator_with_unreachable_store(FakeSeatLockRegistry::new(StdDuration::from_secs(300)));

        let result = coordinator
            .commit(CommitRequest {
                user_id: Uuid::new_v4(),
                event_id: Uuid::new_v4(),
                seat_ids: vec![Uuid::new_v4()],
                lock_ids: vec![Uuid::new_v4()],
                payment_intent_id: None,
            })
            .await;

        assert!(matches!(result, Err(CommitError::InvalidLocks)));
    }

    /// Models `events::decrement_available_seats`'s conditional `UPDATE ...
    /// WHERE available_seats >= $n` predicate purely in memory, since
    /// exercising the real conditional decrement requires a live Postgres
    /// instance. Scenario 5 ("inventory drift"): capacity has drifted so
    /// only one seat's worth of inventory remains, but two distinct seats
    /// are (incorrectly) AVAILABLE with valid locks. The first commit's
    /// decrement succeeds; the second sees zero rows affected, which step 9
    /// of `commit` maps to `CommitError::SalesClosed`.
    #[test]
    fn scenario_inventory_drift_second_decrement_sees_zero_rows_affected() {
        fn conditional_decrement(available_seats: &mut i32, n: i32) -> u64 {
            if *available_seats >= n {
                *available_seats -= n;
                1
            } else {
                0
            }
        }

        let mut available_seats = 1;

        let first_rows_affected = conditional_decrement(&mut available_seats, 1);
        let second_rows_affected = conditional_decrement(&mut available_seats, 1);

        assert_eq!(first_rows_affected, 1, "first concurrent commit must succeed");
        assert_eq!(
            second_rows_affected, 0,
            "second concurrent commit must affect zero rows and roll back as SALES_CLOSED"
        );
        assert_eq!(available_seats, 0, "inventory must never go negative");
    }
}

fn has_duplicates(ids: &[SeatId]) -> bool {
    let mut seen = ids.to_vec();
    seen.sort();
    seen.dedup();
    seen.len() != ids.len()
}
