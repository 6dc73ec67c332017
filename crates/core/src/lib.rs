pub mod coordinator;
pub mod error;
pub mod pricing;

pub use coordinator::{BookingCommitCoordinator, CommitRequest, CommittedBooking};
pub use error::CommitError;
