use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Seat {
    pub id: Uuid,
    pub venue_id: Uuid,
    pub section: String,
    pub row: String,
    pub number: String,
    #[sqlx(rename = "seat_type")]
    pub seat_type: String,
    pub status: String,
    pub price_modifier: Decimal,
}
