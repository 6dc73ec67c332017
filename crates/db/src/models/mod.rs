pub mod booking;
pub mod event;
pub mod seat;
pub mod venue;

pub use booking::{Booking, BookingSeat};
pub use event::Event;
pub use seat::Seat;
pub use venue::Venue;
