//! Maps `CommitError`/`LockError` onto HTTP status codes. This is the only
//! place the outer layer knows about failure reason codes at all — the
//! core's own contract is the typed `Result`, not an HTTP status.

use axum::http::StatusCode;
use axum::Json;
use seatlock_core::CommitError;
use seatlock_lock::LockError;
use seatlock_types::api::{BookingResult, LockResponse};

pub fn commit_error_response(err: CommitError) -> (StatusCode, Json<BookingResult>) {
    let reason = err.reason_code();
    let status = StatusCode::from_u16(reason.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    if matches!(err, CommitError::SystemError(_)) {
        tracing::error!(error = %err, "commit failed with a system error");
    }
    (status, Json(BookingResult::failure(reason)))
}

pub fn lock_error_response(err: LockError) -> (StatusCode, Json<LockResponse>) {
    let (status, message) = match &err {
        LockError::AlreadyLocked => (StatusCode::CONFLICT, "seat is already locked"),
        LockError::InvalidLock => (StatusCode::CONFLICT, "lock is not valid or not owned by the caller"),
        LockError::NotOwned => (StatusCode::CONFLICT, "lock is not held by the caller"),
        LockError::Transient(_) => (StatusCode::INTERNAL_SERVER_ERROR, "lock registry is unavailable"),
    };
    if matches!(err, LockError::Transient(_)) {
        tracing::error!(error = %err, "lock operation failed transiently");
    }
    (status, Json(LockResponse::failure(message)))
}
