use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Event {
    pub id: Uuid,
    pub venue_id: Uuid,
    pub event_date: DateTime<Utc>,
    pub base_price: Decimal,
    pub max_capacity: i32,
    pub available_seats: i32,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Event {
    /// Purchasability predicate: sales are open, at least one seat remains,
    /// and the event hasn't started yet.
    pub fn can_purchase_tickets(&self, now: DateTime<Utc>) -> bool {
        self.status == "sales_open" && self.available_seats > 0 && now < self.event_date
    }
}
