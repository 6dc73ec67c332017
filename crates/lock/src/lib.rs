pub mod error;
pub mod fake;
pub mod redis_registry;
pub mod registry;

pub use error::LockError;
pub use fake::FakeSeatLockRegistry;
pub use redis_registry::RedisSeatLockRegistry;
pub use registry::{AcquiredLock, ExtendedLock, SeatLockRegistry};
