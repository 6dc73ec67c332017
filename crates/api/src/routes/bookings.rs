use axum::extract::{Path, State};
use axum::Json;
use seatlock_core::{CommitError, CommitRequest};
use seatlock_db::queries::bookings as booking_queries;
use seatlock_types::api::{
    BookingResponse, BookingResult, CancelBookingRequest, ConfirmBookingRequest, CreateBookingRequest,
};
use seatlock_types::ids::BookingId;
use validator::Validate;

use crate::response::commit_error_response;
use crate::state::AppState;

pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<CreateBookingRequest>,
) -> (axum::http::StatusCode, Json<BookingResult>) {
    if let Err(e) = payload.validate() {
        tracing::debug!(error = %e, "create_booking: request validation failed");
        return commit_error_response(CommitError::InvalidRequest);
    }

    let request = CommitRequest {
        user_id: payload.user_id,
        event_id: payload.event_id,
        seat_ids: payload.seat_ids,
        lock_ids: payload.lock_ids,
        payment_intent_id: payload.payment_intent_id,
    };

    match state.coordinator.commit(request).await {
        Ok(committed) => (
            axum::http::StatusCode::CREATED,
            Json(BookingResult::ok(to_response(
                committed.booking,
                committed.seats.into_iter().map(|s| s.seat_id).collect(),
            ))),
        ),
        Err(err) => commit_error_response(err),
    }
}

pub async fn confirm(
    State(state): State<AppState>,
    Path(booking_id): Path<BookingId>,
    Json(payload): Json<ConfirmBookingRequest>,
) -> (axum::http::StatusCode, Json<BookingResult>) {
    match state.coordinator.confirm(booking_id, &payload.payment_intent_id).await {
        Ok(booking) => match booking_queries::list_seats_for_booking(&state.db, booking.id).await {
            Ok(seats) => (
                axum::http::StatusCode::OK,
                Json(BookingResult::ok(to_response(
                    booking,
                    seats.into_iter().map(|s| s.seat_id).collect(),
                ))),
            ),
            Err(e) => commit_error_response(CommitError::SystemError(e)),
        },
        Err(err) => commit_error_response(err),
    }
}

pub async fn cancel(
    State(state): State<AppState>,
    Path(booking_id): Path<BookingId>,
    Json(payload): Json<CancelBookingRequest>,
) -> (axum::http::StatusCode, Json<BookingResult>) {
    match state
        .coordinator
        .cancel(booking_id, payload.user_id, payload.reason.as_deref())
        .await
    {
        Ok(booking) => match booking_queries::list_seats_for_booking(&state.db, booking.id).await {
            Ok(seats) => (
                axum::http::StatusCode::OK,
                Json(BookingResult::ok(to_response(
                    booking,
                    seats.into_iter().map(|s| s.seat_id).collect(),
                ))),
            ),
            Err(e) => commit_error_response(CommitError::SystemError(e)),
        },
        Err(err) => commit_error_response(err),
    }
}

fn to_response(booking: seatlock_db::models::Booking, seat_ids: Vec<uuid::Uuid>) -> BookingResponse {
    BookingResponse {
        id: booking.id,
        user_id: booking.user_id,
        event_id: booking.event_id,
        total_price: booking.total_price,
        status: booking.status.parse().unwrap_or_default(),
        payment_intent_id: booking.payment_intent_id,
        booking_date: booking.booking_date,
        confirmed_at: booking.confirmed_at,
        cancelled_at: booking.cancelled_at,
        cancellation_reason: booking.cancellation_reason,
        seat_ids,
    }
}
