use crate::models::{Booking, BookingSeat};
use anyhow::Result;
use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

pub async fn insert_booking(
    tx: &mut Transaction<'_, Postgres>,
    user_id: Uuid,
    event_id: Uuid,
    total_price: Decimal,
    payment_intent_id: Option<&str>,
) -> Result<Booking> {
    let booking = sqlx::query_as::<_, Booking>(
        "INSERT INTO bookings (id, user_id, event_id, total_price, status, payment_intent_id, booking_date) \
         VALUES ($1, $2, $3, $4, 'pending', $5, $6) \
         RETURNING *",
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(event_id)
    .bind(total_price)
    .bind(payment_intent_id)
    .bind(Utc::now())
    .fetch_one(&mut **tx)
    .await?;

    Ok(booking)
}

pub async fn insert_booking_seats(
    tx: &mut Transaction<'_, Postgres>,
    booking_id: Uuid,
    seat_prices: &[(Uuid, Decimal)],
) -> Result<Vec<BookingSeat>> {
    let mut inserted = Vec::with_capacity(seat_prices.len());
    for (seat_id, price) in seat_prices {
        let row = sqlx::query_as::<_, BookingSeat>(
            "INSERT INTO booking_seats (id, booking_id, seat_id, price_at_booking) \
             VALUES ($1, $2, $3, $4) \
             RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(booking_id)
        .bind(seat_id)
        .bind(price)
        .fetch_one(&mut **tx)
        .await?;
        inserted.push(row);
    }

    Ok(inserted)
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Booking>> {
    let booking = sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(booking)
}

/// Locks the booking row so `confirm`/`cancel` can't race each other on the
/// same booking.
pub async fn find_for_update(tx: &mut Transaction<'_, Postgres>, id: Uuid) -> Result<Option<Booking>> {
    let booking = sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = $1 FOR UPDATE")
        .bind(id)
        .fetch_optional(&mut **tx)
        .await?;

    Ok(booking)
}

pub async fn mark_confirmed(
    tx: &mut Transaction<'_, Postgres>,
    id: Uuid,
    payment_intent_id: &str,
) -> Result<Booking> {
    let booking = sqlx::query_as::<_, Booking>(
        "UPDATE bookings SET status = 'confirmed', payment_intent_id = $2, confirmed_at = $3 \
         WHERE id = $1 \
         RETURNING *",
    )
    .bind(id)
    .bind(payment_intent_id)
    .bind(Utc::now())
    .fetch_one(&mut **tx)
    .await?;

    Ok(booking)
}

pub async fn mark_cancelled(
    tx: &mut Transaction<'_, Postgres>,
    id: Uuid,
    reason: Option<&str>,
) -> Result<Booking> {
    let booking = sqlx::query_as::<_, Booking>(
        "UPDATE bookings SET status = 'cancelled', cancelled_at = $2, cancellation_reason = $3 \
         WHERE id = $1 \
         RETURNING *",
    )
    .bind(id)
    .bind(Utc::now())
    .bind(reason)
    .fetch_one(&mut **tx)
    .await?;

    Ok(booking)
}

pub async fn list_seats_for_booking(pool: &PgPool, booking_id: Uuid) -> Result<Vec<BookingSeat>> {
    let seats = sqlx::query_as::<_, BookingSeat>(
        "SELECT * FROM booking_seats WHERE booking_id = $1 ORDER BY id",
    )
    .bind(booking_id)
    .fetch_all(pool)
    .await?;

    Ok(seats)
}

pub async fn list_seats_for_booking_tx(
    tx: &mut Transaction<'_, Postgres>,
    booking_id: Uuid,
) -> Result<Vec<BookingSeat>> {
    let seats = sqlx::query_as::<_, BookingSeat>(
        "SELECT * FROM booking_seats WHERE booking_id = $1 ORDER BY id",
    )
    .bind(booking_id)
    .fetch_all(&mut **tx)
    .await?;

    Ok(seats)
}
