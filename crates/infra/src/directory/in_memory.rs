use std::sync::RwLock;

use async_trait::async_trait;

use clientele_core::{CustomerId, Entity};
use clientele_customers::{Customer, CustomerDraft};

use super::r#trait::{CustomerDirectory, DirectoryError};

/// In-memory customer directory.
///
/// Intended for tests/dev. Records are kept in insertion order; lookups are
/// linear scans.
#[derive(Debug, Default)]
pub struct InMemoryCustomerDirectory {
    records: RwLock<Vec<Customer>>,
}

impl InMemoryCustomerDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> Result<usize, DirectoryError> {
        let records = self.records.read().map_err(|_| Self::poisoned())?;
        Ok(records.len())
    }

    pub fn is_empty(&self) -> Result<bool, DirectoryError> {
        Ok(self.len()? == 0)
    }

    fn poisoned() -> DirectoryError {
        DirectoryError::Unavailable("lock poisoned".to_string())
    }

    fn find_where<F>(&self, predicate: F) -> Result<Option<Customer>, DirectoryError>
    where
        F: Fn(&Customer) -> bool,
    {
        let records = self.records.read().map_err(|_| Self::poisoned())?;
        Ok(records.iter().find(|c| predicate(c)).cloned())
    }
}

#[async_trait]
impl CustomerDirectory for InMemoryCustomerDirectory {
    async fn insert(&self, draft: CustomerDraft) -> Result<Customer, DirectoryError> {
        let mut records = self.records.write().map_err(|_| Self::poisoned())?;

        if records.iter().any(|c| c.email() == draft.email()) {
            return Err(DirectoryError::Conflict(format!(
                "email '{}' is already registered",
                draft.email()
            )));
        }

        let customer = Customer::new(CustomerId::new(), draft);
        records.push(customer.clone());
        Ok(customer)
    }

    async fn find_by_id(&self, id: CustomerId) -> Result<Option<Customer>, DirectoryError> {
        self.find_where(|c| *c.id() == id)
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Customer>, DirectoryError> {
        self.find_where(|c| c.name() == name)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Customer>, DirectoryError> {
        self.find_where(|c| c.email() == email)
    }

    async fn update(&self, customer: Customer) -> Result<Customer, DirectoryError> {
        let mut records = self.records.write().map_err(|_| Self::poisoned())?;
        let id = *customer.id();

        if records
            .iter()
            .any(|c| *c.id() != id && c.email() == customer.email())
        {
            return Err(DirectoryError::Conflict(format!(
                "email '{}' is already registered",
                customer.email()
            )));
        }

        let slot = records
            .iter_mut()
            .find(|c| *c.id() == id)
            .ok_or(DirectoryError::Missing(id))?;
        *slot = customer.clone();
        Ok(customer)
    }

    async fn exists_by_id(&self, id: CustomerId) -> Result<bool, DirectoryError> {
        let records = self.records.read().map_err(|_| Self::poisoned())?;
        Ok(records.iter().any(|c| *c.id() == id))
    }

    async fn delete_by_id(&self, id: CustomerId) -> Result<(), DirectoryError> {
        let mut records = self.records.write().map_err(|_| Self::poisoned())?;
        records.retain(|c| *c.id() != id);
        Ok(())
    }
}
