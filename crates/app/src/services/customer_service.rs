//! Customer service — use-cases for managing customers.

use crm_domain::customer::{Customer, CustomerPatch};
use crm_domain::error::{CrmError, CustomerNotFoundError, EmailUnavailableError};
use crm_domain::id::CustomerId;

use crate::ports::CustomerRepository;

/// Application service for customer CRUD operations.
///
/// Enforces email uniqueness and target existence before delegating to the
/// repository. The uniqueness check and the following save are two separate
/// store calls, so two concurrent requests for the same email can both pass
/// the check; only a store-level unique constraint closes that window.
pub struct CustomerService<R> {
    repo: R,
}

impl<R: CustomerRepository> CustomerService<R> {
    /// Create a new service backed by the given repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// List all customers.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn get_customers(&self) -> Result<Vec<Customer>, CrmError> {
        self.repo.find_all().await
    }

    /// Look up a customer by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`CrmError::CustomerNotFound`] when no customer with `id`
    /// exists, or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn get_customer(&self, id: CustomerId) -> Result<Customer, CrmError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| CustomerNotFoundError::Lookup { id }.into())
    }

    /// Register a new customer.
    ///
    /// # Errors
    ///
    /// Returns [`CrmError::EmailUnavailable`] if another customer already
    /// uses `email`, or a storage error from the repository.
    #[tracing::instrument(skip(self, name, address))]
    pub async fn create_customer(
        &self,
        name: String,
        email: String,
        address: String,
    ) -> Result<Customer, CrmError> {
        if self.repo.find_by_email(&email).await?.is_some() {
            tracing::debug!("email already taken, rejecting creation");
            return Err(EmailUnavailableError::Create { email }.into());
        }

        let created = self.repo.save(Customer::new(name, email, address)).await?;
        tracing::info!(id = ?created.id, "customer created");
        Ok(created)
    }

    /// Apply a partial update to an existing customer.
    ///
    /// Fields absent from `patch`, or equal to the stored value, are left
    /// alone. When nothing would change the stored record is returned as-is.
    ///
    /// # Errors
    ///
    /// Returns [`CrmError::CustomerNotFound`] when no customer with `id`
    /// exists, [`CrmError::EmailUnavailable`] when the new email belongs to
    /// another customer, or a storage error from the repository.
    #[tracing::instrument(skip(self, patch))]
    pub async fn update_customer(
        &self,
        id: CustomerId,
        patch: CustomerPatch,
    ) -> Result<Customer, CrmError> {
        let mut customer = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(CustomerNotFoundError::Lookup { id })?;

        let changes = patch.changes_against(&customer);
        if changes.is_empty() {
            tracing::debug!("update carries no change");
            return Ok(customer);
        }

        if let Some(email) = &changes.email
            && self.repo.find_by_email(email).await?.is_some()
        {
            tracing::debug!("email already taken, rejecting update");
            return Err(EmailUnavailableError::Update {
                email: email.clone(),
            }
            .into());
        }

        changes.apply_to(&mut customer);
        let saved = self.repo.save(customer).await?;
        tracing::info!("customer updated");
        Ok(saved)
    }

    /// Delete a customer by id.
    ///
    /// # Errors
    ///
    /// Returns [`CrmError::CustomerNotFound`] when no customer with `id`
    /// exists, or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn delete_customer(&self, id: CustomerId) -> Result<(), CrmError> {
        if !self.repo.exists_by_id(id).await? {
            tracing::debug!("customer missing, rejecting deletion");
            return Err(CustomerNotFoundError::Delete { id }.into());
        }

        self.repo.delete_by_id(id).await?;
        tracing::info!("customer deleted");
        Ok(())
    }
}
