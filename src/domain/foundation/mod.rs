//! Foundation types shared across the domain layer.

mod errors;
mod ids;
mod timestamp;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{RequestId, SubscriberId};
pub use timestamp::Timestamp;
