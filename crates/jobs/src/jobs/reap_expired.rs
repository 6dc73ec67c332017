use std::sync::Arc;

use seatlock_lock::SeatLockRegistry;

/// Best-effort sweep of expired lock entries. Correctness of the core never
/// depends on this running — the registry's own TTL is authoritative — it
/// only keeps the backing store's memory footprint from growing with dead
/// entries between natural reclamation.
pub async fn reap_expired_locks(registry: &Arc<dyn SeatLockRegistry>) -> anyhow::Result<()> {
    let removed = registry.reap_expired().await;
    if removed > 0 {
        tracing::info!(removed, "swept expired seat locks");
    }
    Ok(())
}
