use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Minimal referenced entity: venues have no operations of their own in this
/// core (administrative workflows are out of scope); `seats.venue_id` just
/// needs a real foreign-key target.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Venue {
    pub id: Uuid,
    pub name: String,
    pub city: String,
    pub created_at: DateTime<Utc>,
}
