//! Customer service: CRUD orchestration over a `CustomerDirectory`.
//!
//! ```text
//! request
//!   ↓
//! 1. Look up (by id / name / email)      → NotFound when absent
//!   ↓
//! 2. Validate request fields             → Validation (nothing written)
//!   ↓
//! 3. One atomic directory write          → Conflict on duplicate email
//!   ↓
//! 4. Assemble response (fields + tier computed for today)
//! ```
//!
//! Every read goes back to the directory and recomputes the tier. Failures are
//! never retried or swallowed here; they surface as `DomainError` unchanged.

use tracing::{error, info, warn};

use clientele_core::{Clock, CustomerId, DomainError, DomainResult, Entity, SystemClock};
use clientele_customers::{
    Customer, CustomerRequest, CustomerResponse, LookupKey, validate_request,
};

use crate::directory::{CustomerDirectory, DirectoryError};

const ENTITY: &str = "customer";

pub struct CustomerService<D, C = SystemClock> {
    directory: D,
    clock: C,
}

impl<D> CustomerService<D, SystemClock>
where
    D: CustomerDirectory,
{
    pub fn new(directory: D) -> Self {
        Self::with_clock(directory, SystemClock)
    }
}

impl<D, C> CustomerService<D, C>
where
    D: CustomerDirectory,
    C: Clock,
{
    pub fn with_clock(directory: D, clock: C) -> Self {
        Self { directory, clock }
    }

    pub fn directory(&self) -> &D {
        &self.directory
    }

    pub async fn create(&self, request: CustomerRequest) -> DomainResult<CustomerResponse> {
        info!(email = request.email.as_deref().unwrap_or_default(), "creating customer");

        let draft = validate_request(&request).inspect_err(log_rejection)?;
        let customer = self
            .directory
            .insert(draft)
            .await
            .map_err(|e| self.storage_failure("create", e))?;

        info!(customer_id = %customer.id(), "customer created");
        Ok(self.assemble(&customer))
    }

    pub async fn get_by_id(&self, id: CustomerId) -> DomainResult<CustomerResponse> {
        let customer = self.load(LookupKey::Id(id)).await?;
        Ok(self.assemble(&customer))
    }

    /// Names are not unique; the earliest created match is returned.
    pub async fn get_by_name(&self, name: &str) -> DomainResult<CustomerResponse> {
        let customer = self.load(LookupKey::Name(name.to_string())).await?;
        Ok(self.assemble(&customer))
    }

    pub async fn get_by_email(&self, email: &str) -> DomainResult<CustomerResponse> {
        let customer = self.load(LookupKey::Email(email.to_string())).await?;
        Ok(self.assemble(&customer))
    }

    /// Replace every mutable field of an existing customer. The id never changes.
    pub async fn update(
        &self,
        id: CustomerId,
        request: CustomerRequest,
    ) -> DomainResult<CustomerResponse> {
        info!(customer_id = %id, "updating customer");

        let mut customer = self.load(LookupKey::Id(id)).await?;
        let draft = validate_request(&request).inspect_err(log_rejection)?;
        customer.apply(draft);

        let updated = self
            .directory
            .update(customer)
            .await
            .map_err(|e| self.storage_failure("update", e))?;

        info!(customer_id = %id, "customer updated");
        Ok(self.assemble(&updated))
    }

    pub async fn delete(&self, id: CustomerId) -> DomainResult<()> {
        info!(customer_id = %id, "deleting customer");

        let exists = self
            .directory
            .exists_by_id(id)
            .await
            .map_err(|e| self.storage_failure("delete", e))?;
        if !exists {
            warn!(customer_id = %id, "customer not found for deletion");
            return Err(DomainError::not_found(ENTITY, LookupKey::Id(id)));
        }

        self.directory
            .delete_by_id(id)
            .await
            .map_err(|e| self.storage_failure("delete", e))?;

        info!(customer_id = %id, "customer deleted");
        Ok(())
    }

    async fn load(&self, key: LookupKey) -> DomainResult<Customer> {
        let found = match &key {
            LookupKey::Id(id) => self.directory.find_by_id(*id).await,
            LookupKey::Name(name) => self.directory.find_by_name(name).await,
            LookupKey::Email(email) => self.directory.find_by_email(email).await,
        }
        .map_err(|e| self.storage_failure("lookup", e))?;

        found.ok_or_else(|| {
            warn!(key = %key, "customer not found");
            DomainError::not_found(ENTITY, key)
        })
    }

    fn assemble(&self, customer: &Customer) -> CustomerResponse {
        CustomerResponse::assemble(customer, self.clock.today())
    }

    fn storage_failure(&self, operation: &'static str, err: DirectoryError) -> DomainError {
        match &err {
            DirectoryError::Unavailable(detail) => {
                error!(operation, detail = %detail, "customer directory failure");
            }
            other => warn!(operation, error = %other, "customer write rejected"),
        }
        err.into()
    }
}

fn log_rejection(err: &DomainError) {
    if let DomainError::Validation(fields) = err {
        info!(fields = %fields, "customer request failed validation");
    }
}
