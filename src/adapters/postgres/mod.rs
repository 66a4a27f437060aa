//! PostgreSQL adapters.

pub mod pool;

mod subscriber_store;

pub use subscriber_store::PostgresSubscriberStore;
