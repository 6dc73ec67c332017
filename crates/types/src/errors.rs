//! Stable failure reason codes shared between the coordinator and the outer
//! API layer.
//!
//! These are deliberately just strings plus an enum to match them against —
//! the wire format callers depend on is the stable string, not the Rust type.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FailureReason {
    InvalidRequest,
    InvalidLocks,
    EventNotFound,
    SalesClosed,
    SeatsNotFound,
    SeatsNotAvailable,
    BookingNotFound,
    InvalidStatus,
    AlreadyCancelled,
    SystemError,
}

impl FailureReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidRequest => "INVALID_REQUEST",
            Self::InvalidLocks => "INVALID_LOCKS",
            Self::EventNotFound => "EVENT_NOT_FOUND",
            Self::SalesClosed => "SALES_CLOSED",
            Self::SeatsNotFound => "SEATS_NOT_FOUND",
            Self::SeatsNotAvailable => "SEATS_NOT_AVAILABLE",
            Self::BookingNotFound => "BOOKING_NOT_FOUND",
            Self::InvalidStatus => "INVALID_STATUS",
            Self::AlreadyCancelled => "ALREADY_CANCELLED",
            Self::SystemError => "SYSTEM_ERROR",
        }
    }

    /// Whether this is a user error (deterministic, caller-fixable) as
    /// opposed to a transient/infrastructure failure.
    pub fn is_user_error(&self) -> bool {
        !matches!(self, Self::SystemError)
    }

    /// HTTP status the thin outer layer maps this onto. Not part of the
    /// core's contract (transport is out of scope) but convenient to keep
    /// next to the reason codes it mirrors.
    pub fn http_status(&self) -> u16 {
        match self {
            Self::InvalidRequest | Self::InvalidLocks => 400,
            Self::EventNotFound | Self::BookingNotFound => 404,
            Self::SalesClosed | Self::SeatsNotAvailable | Self::AlreadyCancelled => 409,
            Self::SeatsNotFound => 404,
            Self::InvalidStatus => 409,
            Self::SystemError => 500,
        }
    }
}

impl std::fmt::Display for FailureReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
