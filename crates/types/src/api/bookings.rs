use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::enums::BookingStatus;
use crate::ids::{BookingId, EventId, LockId, SeatId, UserId};

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateBookingRequest {
    pub user_id: UserId,
    pub event_id: EventId,
    #[validate(length(min = 1, message = "seat_ids must not be empty"))]
    pub seat_ids: Vec<SeatId>,
    #[validate(length(min = 1, message = "lock_ids must not be empty"))]
    pub lock_ids: Vec<LockId>,
    pub payment_intent_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConfirmBookingRequest {
    pub payment_intent_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CancelBookingRequest {
    pub user_id: UserId,
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BookingResponse {
    pub id: BookingId,
    pub user_id: UserId,
    pub event_id: EventId,
    pub total_price: Decimal,
    pub status: BookingStatus,
    pub payment_intent_id: Option<String>,
    pub booking_date: DateTime<Utc>,
    pub confirmed_at: Option<DateTime<Utc>>,
    pub cancelled_at: Option<DateTime<Utc>>,
    pub cancellation_reason: Option<String>,
    pub seat_ids: Vec<SeatId>,
}

/// Response envelope: `{ success, booking?, failure_reason? }`.
#[derive(Debug, Clone, Serialize)]
pub struct BookingResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booking: Option<BookingResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure_reason: Option<&'static str>,
}

impl BookingResult {
    pub fn ok(booking: BookingResponse) -> Self {
        Self {
            success: true,
            booking: Some(booking),
            failure_reason: None,
        }
    }

    pub fn failure(reason: crate::errors::FailureReason) -> Self {
        Self {
            success: false,
            booking: None,
            failure_reason: Some(reason.as_str()),
        }
    }
}
