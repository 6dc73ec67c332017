//! Newtype-free id aliases shared across the workspace.
//!
//! Every identifier in the data model is a bare UUID at rest; we keep
//! them as type aliases rather than wrapper structs because the query
//! layer passes raw `Uuid` values straight into `sqlx::query_as` bindings
//! and newtypes would only add friction there.

use uuid::Uuid;

pub type EventId = Uuid;
pub type VenueId = Uuid;
pub type SeatId = Uuid;
pub type UserId = Uuid;
pub type BookingId = Uuid;
pub type LockId = Uuid;
