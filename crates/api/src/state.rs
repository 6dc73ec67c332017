use std::sync::Arc;

use seatlock_cache::CacheInvalidationHook;
use seatlock_core::BookingCommitCoordinator;
use seatlock_db::Pool;
use seatlock_lock::SeatLockRegistry;

/// Shared application state. Built once in `main` and cloned (cheaply —
/// everything inside is an `Arc` or a pool handle) into every request.
#[derive(Clone)]
pub struct AppState {
    pub db: Pool,
    pub registry: Arc<dyn SeatLockRegistry>,
    pub coordinator: Arc<BookingCommitCoordinator>,
    pub cache: Arc<dyn CacheInvalidationHook>,
}
