use crate::models::Event;
use anyhow::Result;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

/// Read-only lookup, no row lock.
pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Event>> {
    let event = sqlx::query_as::<_, Event>("SELECT * FROM events WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(event)
}

/// Locks the event row for the duration of the commit transaction so
/// concurrent commits against the same event serialize on it.
pub async fn find_for_update(tx: &mut Transaction<'_, Postgres>, id: Uuid) -> Result<Option<Event>> {
    let event = sqlx::query_as::<_, Event>("SELECT * FROM events WHERE id = $1 FOR UPDATE")
        .bind(id)
        .fetch_optional(&mut **tx)
        .await?;

    Ok(event)
}

/// Conditionally decrements available inventory, failing the predicate
/// instead of going negative. Returns the number of rows affected — zero
/// means inventory was exhausted concurrently despite valid locks, which
/// the coordinator surfaces as `SALES_CLOSED`.
pub async fn decrement_available_seats(
    tx: &mut Transaction<'_, Postgres>,
    event_id: Uuid,
    count: i32,
) -> Result<u64> {
    let result = sqlx::query(
        "UPDATE events SET available_seats = available_seats - $2, updated_at = NOW() \
         WHERE id = $1 AND available_seats >= $2",
    )
    .bind(event_id)
    .bind(count)
    .execute(&mut **tx)
    .await?;

    Ok(result.rows_affected())
}

/// Used by `cancel`: returning seats to inventory has no scarcity predicate
/// to defend, so a plain increment (bounded by `max_capacity` in SQL) is
/// enough.
pub async fn increment_available_seats(
    tx: &mut Transaction<'_, Postgres>,
    event_id: Uuid,
    count: i32,
) -> Result<()> {
    sqlx::query(
        "UPDATE events SET available_seats = LEAST(available_seats + $2, max_capacity), updated_at = NOW() \
         WHERE id = $1",
    )
    .bind(event_id)
    .bind(count)
    .execute(&mut **tx)
    .await?;

    Ok(())
}
