//! Customer directory boundary.
//!
//! The directory is the keyed store holding customer records. The service only
//! sees the `CustomerDirectory` trait, so the in-memory store (tests/dev) and
//! the Postgres store are interchangeable.

pub mod in_memory;
pub mod postgres;
pub mod r#trait;

pub use in_memory::InMemoryCustomerDirectory;
pub use postgres::PostgresCustomerDirectory;
pub use r#trait::{CustomerDirectory, DirectoryError};
