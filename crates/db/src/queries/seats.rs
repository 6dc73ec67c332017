use crate::models::Seat;
use anyhow::Result;
use sqlx::{Postgres, Transaction};
use uuid::Uuid;

/// Locks a batch of seat rows for the duration of a commit. Callers must
/// sort `seat_ids` before calling this (the coordinator does) so that two
/// overlapping bookings always acquire row locks in the same order and
/// cannot deadlock against each other.
pub async fn find_many_for_update(
    tx: &mut Transaction<'_, Postgres>,
    seat_ids: &[Uuid],
) -> Result<Vec<Seat>> {
    let seats = sqlx::query_as::<_, Seat>(
        "SELECT * FROM seats WHERE id = ANY($1) ORDER BY id FOR UPDATE",
    )
    .bind(seat_ids)
    .fetch_all(&mut **tx)
    .await?;

    Ok(seats)
}

pub async fn update_status_batch(
    tx: &mut Transaction<'_, Postgres>,
    seat_ids: &[Uuid],
    status: &str,
) -> Result<()> {
    sqlx::query("UPDATE seats SET status = $2 WHERE id = ANY($1)")
        .bind(seat_ids)
        .bind(status)
        .execute(&mut **tx)
        .await?;

    Ok(())
}
