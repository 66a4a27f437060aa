//! Domain layer - entities and value objects.

pub mod foundation;
pub mod subscriber;
