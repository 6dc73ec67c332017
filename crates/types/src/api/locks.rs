use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::ids::{EventId, LockId, SeatId, UserId};

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AcquireLockRequest {
    pub seat_id: SeatId,
    pub event_id: EventId,
    pub user_id: UserId,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ExtendLockRequest {
    pub user_id: UserId,
    pub lock_id: LockId,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ReleaseLockRequest {
    pub user_id: UserId,
    pub lock_id: LockId,
}

/// Shape shared by `acquire_lock` and `extend_lock` responses.
#[derive(Debug, Clone, Serialize)]
pub struct LockResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lock_id: Option<LockId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl LockResponse {
    pub fn ok(lock_id: LockId, expires_at: DateTime<Utc>) -> Self {
        Self {
            success: true,
            lock_id: Some(lock_id),
            expires_at: Some(expires_at),
            message: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            lock_id: None,
            expires_at: None,
            message: Some(message.into()),
        }
    }
}
