//! Shared application state for axum handlers.

use std::sync::Arc;

use crm_app::ports::CustomerRepository;
use crm_app::services::customer_service::CustomerService;

/// Application state shared across all axum handlers.
///
/// Generic over the repository type to avoid dynamic dispatch.
/// `Clone` is implemented manually so the repository itself does not need to
/// be `Clone` — only the `Arc` wrapper is cloned.
pub struct AppState<R> {
    /// Customer CRUD service.
    pub customer_service: Arc<CustomerService<R>>,
}

impl<R> Clone for AppState<R> {
    fn clone(&self) -> Self {
        Self {
            customer_service: Arc::clone(&self.customer_service),
        }
    }
}

impl<R> AppState<R>
where
    R: CustomerRepository + Send + Sync + 'static,
{
    /// Create a new application state from a service instance.
    pub fn new(customer_service: CustomerService<R>) -> Self {
        Self {
            customer_service: Arc::new(customer_service),
        }
    }
}
