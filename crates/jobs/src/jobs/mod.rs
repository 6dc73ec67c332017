pub mod reap_expired;

pub use reap_expired::reap_expired_locks;
