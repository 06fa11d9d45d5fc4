use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use clientele_core::{CustomerId, DomainError};
use clientele_customers::{Customer, CustomerDraft, LookupKey};

/// Directory operation error.
///
/// These are **infrastructure errors** as opposed to domain errors; the service
/// maps them into `DomainError` before they leave the core.
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// A uniqueness constraint (email) rejected the write.
    #[error("unique constraint violated: {0}")]
    Conflict(String),

    /// The record disappeared between lookup and write (concurrent delete).
    #[error("customer {0} no longer exists")]
    Missing(CustomerId),

    /// Storage could not serve the request (connection, poisoned lock, bad row, ...).
    #[error("directory unavailable: {0}")]
    Unavailable(String),
}

impl From<DirectoryError> for DomainError {
    fn from(value: DirectoryError) -> Self {
        match value {
            DirectoryError::Conflict(msg) => DomainError::conflict(msg),
            DirectoryError::Missing(id) => DomainError::not_found("customer", LookupKey::Id(id)),
            DirectoryError::Unavailable(msg) => DomainError::unexpected(msg),
        }
    }
}

/// Keyed storage for customer records.
///
/// ## Semantics
///
/// - `insert` assigns the identifier and rejects a duplicate email with `Conflict`.
/// - `find_by_name` returns the earliest inserted match when several customers
///   share a name; names are not unique.
/// - `update` persists every mutable field of an existing record; changing the
///   email to one held by another record is a `Conflict`.
/// - Every write is atomic per record: it is fully applied or not at all.
#[async_trait]
pub trait CustomerDirectory: Send + Sync {
    async fn insert(&self, draft: CustomerDraft) -> Result<Customer, DirectoryError>;

    async fn find_by_id(&self, id: CustomerId) -> Result<Option<Customer>, DirectoryError>;

    async fn find_by_name(&self, name: &str) -> Result<Option<Customer>, DirectoryError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<Customer>, DirectoryError>;

    async fn update(&self, customer: Customer) -> Result<Customer, DirectoryError>;

    async fn exists_by_id(&self, id: CustomerId) -> Result<bool, DirectoryError>;

    async fn delete_by_id(&self, id: CustomerId) -> Result<(), DirectoryError>;
}

#[async_trait]
impl<S> CustomerDirectory for Arc<S>
where
    S: CustomerDirectory + ?Sized,
{
    async fn insert(&self, draft: CustomerDraft) -> Result<Customer, DirectoryError> {
        (**self).insert(draft).await
    }

    async fn find_by_id(&self, id: CustomerId) -> Result<Option<Customer>, DirectoryError> {
        (**self).find_by_id(id).await
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Customer>, DirectoryError> {
        (**self).find_by_name(name).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Customer>, DirectoryError> {
        (**self).find_by_email(email).await
    }

    async fn update(&self, customer: Customer) -> Result<Customer, DirectoryError> {
        (**self).update(customer).await
    }

    async fn exists_by_id(&self, id: CustomerId) -> Result<bool, DirectoryError> {
        (**self).exists_by_id(id).await
    }

    async fn delete_by_id(&self, id: CustomerId) -> Result<(), DirectoryError> {
        (**self).delete_by_id(id).await
    }
}
