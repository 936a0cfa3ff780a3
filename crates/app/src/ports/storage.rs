//! Storage port — repository trait for customer persistence.

use std::future::Future;

use crm_domain::customer::Customer;
use crm_domain::error::CrmError;
use crm_domain::id::CustomerId;

/// Repository for persisting and querying [`Customer`]s.
///
/// A thin persistence boundary: implementations carry no business rules.
pub trait CustomerRepository {
    /// Get every stored customer. Order is unspecified.
    fn find_all(&self) -> impl Future<Output = Result<Vec<Customer>, CrmError>> + Send;

    /// Get a customer by its identifier.
    fn find_by_id(
        &self,
        id: CustomerId,
    ) -> impl Future<Output = Result<Option<Customer>, CrmError>> + Send;

    /// Get the customer holding exactly `email`.
    fn find_by_email(
        &self,
        email: &str,
    ) -> impl Future<Output = Result<Option<Customer>, CrmError>> + Send;

    /// Insert the customer when its `id` is unset, otherwise overwrite the
    /// row with the same `id`. Returns the persisted record.
    fn save(&self, customer: Customer)
    -> impl Future<Output = Result<Customer, CrmError>> + Send;

    /// Whether a customer with `id` is stored.
    fn exists_by_id(&self, id: CustomerId)
    -> impl Future<Output = Result<bool, CrmError>> + Send;

    /// Remove the customer with `id`.
    fn delete_by_id(&self, id: CustomerId) -> impl Future<Output = Result<(), CrmError>> + Send;

    /// Remove every customer.
    fn delete_all(&self) -> impl Future<Output = Result<(), CrmError>> + Send;
}
