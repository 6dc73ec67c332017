use seatlock_types::FailureReason;
use thiserror::Error;

/// Typed error surface of the booking commit coordinator. Every variant maps
/// onto exactly one stable failure reason code the outer layer can hand
/// back to a caller.
#[derive(Debug, Error)]
pub enum CommitError {
    #[error("seat_ids and lock_ids must be equal length, non-empty, and seat_ids must not repeat")]
    InvalidRequest,

    #[error("one or more locks failed validation")]
    InvalidLocks,

    #[error("event not found")]
    EventNotFound,

    #[error("event is not open for sales")]
    SalesClosed,

    #[error("one or more seats not found")]
    SeatsNotFound,

    #[error("one or more seats are not available")]
    SeatsNotAvailable,

    #[error("booking not found")]
    BookingNotFound,

    #[error("booking is not in a status that allows this transition")]
    InvalidStatus,

    #[error("booking is already cancelled")]
    AlreadyCancelled,

    #[error("transient infrastructure failure: {0}")]
    SystemError(#[from] anyhow::Error),
}

impl CommitError {
    pub fn reason_code(&self) -> FailureReason {
        match self {
            Self::InvalidRequest => FailureReason::InvalidRequest,
            Self::InvalidLocks => FailureReason::InvalidLocks,
            Self::EventNotFound => FailureReason::EventNotFound,
            Self::SalesClosed => FailureReason::SalesClosed,
            Self::SeatsNotFound => FailureReason::SeatsNotFound,
            Self::SeatsNotAvailable => FailureReason::SeatsNotAvailable,
            Self::BookingNotFound => FailureReason::BookingNotFound,
            Self::InvalidStatus => FailureReason::InvalidStatus,
            Self::AlreadyCancelled => FailureReason::AlreadyCancelled,
            Self::SystemError(_) => FailureReason::SystemError,
        }
    }
}

impl From<sqlx::Error> for CommitError {
    fn from(err: sqlx::Error) -> Self {
        Self::SystemError(err.into())
    }
}
