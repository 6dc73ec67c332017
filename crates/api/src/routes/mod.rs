pub mod bookings;
pub mod locks;
