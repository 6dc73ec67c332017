pub mod bookings;
pub mod locks;

pub use bookings::*;
pub use locks::*;
