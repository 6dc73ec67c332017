use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Script};
use seatlock_types::ids::{EventId, LockId, SeatId, UserId};
use std::time::Duration;

use crate::error::LockError;
use crate::registry::{AcquiredLock, ExtendedLock, SeatLockRegistry};

/// Redis-backed implementation of [`SeatLockRegistry`].
///
/// Each seat lock is a hash at key `{table}:{seat_id}` with fields
/// `event_id, user_id, lock_id, created_at, expires_at` (all milliseconds
/// since epoch where applicable). `PEXPIREAT` mirrors `expires_at` as the
/// key's native TTL, so the store reclaims the entry on its own even if the
/// application never calls [`reap_expired`](SeatLockRegistry::reap_expired).
///
/// Every conditional operation below is one `EVAL` round trip: the
/// predicate check and the mutation happen inside the same Lua script, so
/// there is no read-then-write window for a second caller to win the race
/// in between.
pub struct RedisSeatLockRegistry {
    conn: ConnectionManager,
    table: String,
    ttl: Duration,
    /// Per-operation deadline (§5: "Each registry ... operation has a
    /// deadline"). Exceeding it surfaces as [`LockError::Transient`] rather
    /// than hanging the caller on a wedged connection.
    deadline: Duration,
}

impl RedisSeatLockRegistry {
    pub async fn connect(url: &str, table: impl Into<String>, ttl: Duration) -> Result<Self, LockError> {
        Self::connect_with_deadline(url, table, ttl, Duration::from_secs(5)).await
    }

    pub async fn connect_with_deadline(
        url: &str,
        table: impl Into<String>,
        ttl: Duration,
        deadline: Duration,
    ) -> Result<Self, LockError> {
        let client = redis::Client::open(url).map_err(|e| LockError::Transient(e.to_string()))?;
        let conn = client
            .get_connection_manager()
            .await
            .map_err(|e| LockError::Transient(e.to_string()))?;
        Ok(Self {
            conn,
            table: table.into(),
            ttl,
            deadline,
        })
    }

    fn key(&self, seat_id: SeatId) -> String {
        format!("{}:{}", self.table, seat_id)
    }

    /// Bounds a registry round trip to `self.deadline`. A timed-out call is
    /// indistinguishable from any other transient registry failure to the
    /// caller: both surface as `LockError::Transient`.
    async fn with_deadline<T>(&self, fut: impl std::future::Future<Output = redis::RedisResult<T>>) -> redis::RedisResult<T> {
        match tokio::time::timeout(self.deadline, fut).await {
            Ok(result) => result,
            Err(_) => Err(redis::RedisError::from((
                redis::ErrorKind::IoError,
                "registry operation exceeded deadline",
            ))),
        }
    }
}

fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

fn millis_to_datetime(ms: i64) -> DateTime<Utc> {
    Utc.timestamp_millis_opt(ms).single().unwrap_or_else(Utc::now)
}

const ACQUIRE_SCRIPT: &str = r#"
local key = KEYS[1]
local now = tonumber(ARGV[1])
if redis.call('EXISTS', key) == 1 then
    local expires_at = tonumber(redis.call('HGET', key, 'expires_at'))
    if expires_at and expires_at > now then
        return 0
    end
end
redis.call('HSET', key, 'event_id', ARGV[2], 'user_id', ARGV[3], 'lock_id', ARGV[4], 'created_at', ARGV[1], 'expires_at', ARGV[5])
redis.call('PEXPIREAT', key, ARGV[5])
return 1
"#;

const EXTEND_SCRIPT: &str = r#"
local key = KEYS[1]
local now = tonumber(ARGV[1])
if redis.call('EXISTS', key) == 0 then
    return 0
end
local user_id = redis.call('HGET', key, 'user_id')
local lock_id = redis.call('HGET', key, 'lock_id')
local expires_at = tonumber(redis.call('HGET', key, 'expires_at'))
if user_id ~= ARGV[2] or lock_id ~= ARGV[3] or not expires_at or expires_at <= now then
    return 0
end
redis.call('HSET', key, 'expires_at', ARGV[4])
redis.call('PEXPIREAT', key, ARGV[4])
return 1
"#;

const RELEASE_SCRIPT: &str = r#"
local key = KEYS[1]
if redis.call('EXISTS', key) == 0 then
    return 0
end
local user_id = redis.call('HGET', key, 'user_id')
local lock_id = redis.call('HGET', key, 'lock_id')
if user_id ~= ARGV[1] or lock_id ~= ARGV[2] then
    return 0
end
redis.call('DEL', key)
return 1
"#;

#[async_trait]
impl SeatLockRegistry for RedisSeatLockRegistry {
    async fn acquire(
        &self,
        seat_id: SeatId,
        event_id: EventId,
        user_id: UserId,
    ) -> Result<AcquiredLock, LockError> {
        let lock_id = LockId::new_v4();
        let now = now_ms();
        let expires_at = now + self.ttl.as_millis() as i64;

        let mut conn = self.conn.clone();
        let won: i64 = self
            .with_deadline(
                Script::new(ACQUIRE_SCRIPT)
                    .key(self.key(seat_id))
                    .arg(now)
                    .arg(event_id.to_string())
                    .arg(user_id.to_string())
                    .arg(lock_id.to_string())
                    .arg(expires_at)
                    .invoke_async(&mut conn),
            )
            .await
            .map_err(|e| LockError::Transient(e.to_string()))?;

        if won == 1 {
            Ok(AcquiredLock {
                lock_id,
                expires_at: millis_to_datetime(expires_at),
            })
        } else {
            Err(LockError::AlreadyLocked)
        }
    }

    async fn extend(
        &self,
        seat_id: SeatId,
        _event_id: EventId,
        user_id: UserId,
        lock_id: LockId,
    ) -> Result<ExtendedLock, LockError> {
        let now = now_ms();
        let new_expires_at = now + self.ttl.as_millis() as i64;

        let mut conn = self.conn.clone();
        let ok: i64 = self
            .with_deadline(
                Script::new(EXTEND_SCRIPT)
                    .key(self.key(seat_id))
                    .arg(now)
                    .arg(user_id.to_string())
                    .arg(lock_id.to_string())
                    .arg(new_expires_at)
                    .invoke_async(&mut conn),
            )
            .await
            .map_err(|e| LockError::Transient(e.to_string()))?;

        if ok == 1 {
            Ok(ExtendedLock {
                new_expires_at: millis_to_datetime(new_expires_at),
            })
        } else {
            Err(LockError::InvalidLock)
        }
    }

    async fn release(&self, seat_id: SeatId, user_id: UserId, lock_id: LockId) -> Result<(), LockError> {
        let mut conn = self.conn.clone();
        let ok: i64 = self
            .with_deadline(
                Script::new(RELEASE_SCRIPT)
                    .key(self.key(seat_id))
                    .arg(user_id.to_string())
                    .arg(lock_id.to_string())
                    .invoke_async(&mut conn),
            )
            .await
            .map_err(|e| LockError::Transient(e.to_string()))?;

        if ok == 1 {
            Ok(())
        } else {
            Err(LockError::NotOwned)
        }
    }

    async fn is_locked(&self, seat_id: SeatId) -> bool {
        let mut conn = self.conn.clone();
        let result: redis::RedisResult<Option<i64>> =
            self.with_deadline(conn.hget(self.key(seat_id), "expires_at")).await;
        match result {
            Ok(Some(expires_at)) => expires_at > now_ms(),
            Ok(None) => false,
            Err(e) => {
                tracing::warn!(seat_id = %seat_id, error = %e, "is_locked: registry read failed, failing closed");
                true
            }
        }
    }

    async fn validate(&self, seat_id: SeatId, user_id: UserId, lock_id: LockId) -> bool {
        let mut conn = self.conn.clone();
        let result: redis::RedisResult<Vec<(String, String)>> =
            self.with_deadline(conn.hgetall(self.key(seat_id))).await;

        match result {
            Ok(fields) if !fields.is_empty() => {
                let mut got_user = None;
                let mut got_lock = None;
                let mut got_expires: Option<i64> = None;
                for (k, v) in fields {
                    match k.as_str() {
                        "user_id" => got_user = Some(v),
                        "lock_id" => got_lock = Some(v),
                        "expires_at" => got_expires = v.parse().ok(),
                        _ => {}
                    }
                }
                got_user.as_deref() == Some(user_id.to_string().as_str())
                    && got_lock.as_deref() == Some(lock_id.to_string().as_str())
                    && got_expires.is_some_and(|e| e > now_ms())
            }
            Ok(_) => false,
            Err(e) => {
                tracing::warn!(seat_id = %seat_id, error = %e, "validate: registry read failed, failing closed");
                false
            }
        }
    }

    async fn reap_expired(&self) -> u64 {
        let pattern = format!("{}:*", self.table);
        let mut conn = self.conn.clone();
        let mut cursor: u64 = 0;
        let mut swept: u64 = 0;
        let now = now_ms();

        loop {
            let scan_result: redis::RedisResult<(u64, Vec<String>)> = redis::cmd("SCAN")
                .arg(cursor)
                .arg("MATCH")
                .arg(&pattern)
                .arg("COUNT")
                .arg(200)
                .query_async(&mut conn)
                .await;

            let (next_cursor, keys) = match scan_result {
                Ok(v) => v,
                Err(e) => {
                    tracing::warn!(error = %e, "reap_expired: scan failed, aborting this sweep");
                    break;
                }
            };

            for key in keys {
                let expires_at: redis::RedisResult<Option<i64>> = conn.hget(&key, "expires_at").await;
                if let Ok(Some(expires_at)) = expires_at {
                    if expires_at <= now {
                        let _: redis::RedisResult<()> = conn.del(&key).await;
                        swept += 1;
                    }
                }
            }

            cursor = next_cursor;
            if cursor == 0 {
                break;
            }
        }

        swept
    }
}
