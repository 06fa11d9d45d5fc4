//! Infrastructure layer: customer storage and service orchestration.

pub mod customer_service;
pub mod directory;

pub use customer_service::CustomerService;
pub use directory::{
    CustomerDirectory, DirectoryError, InMemoryCustomerDirectory, PostgresCustomerDirectory,
};
