//! Customer domain module.
//!
//! Business rules for customer records: the record itself, request validation
//! and loyalty tier classification. Pure, deterministic logic (no IO, no HTTP,
//! no storage).

pub mod customer;
pub mod tier;
pub mod validation;

pub use customer::{Customer, CustomerDraft, CustomerRequest, CustomerResponse, LookupKey};
pub use tier::{Tier, classify};
pub use validation::validate_request;
