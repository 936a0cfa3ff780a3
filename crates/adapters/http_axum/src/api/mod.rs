//! JSON REST API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod customers;

use axum::Router;
use axum::routing::get;

use crm_app::ports::CustomerRepository;

use crate::state::AppState;

/// Build the `/api/v1` sub-router.
pub fn routes<R>() -> Router<AppState<R>>
where
    R: CustomerRepository + Send + Sync + 'static,
{
    Router::new()
        .route(
            "/customers",
            get(customers::list::<R>).post(customers::create::<R>),
        )
        .route(
            "/customers/{id}",
            get(customers::get::<R>)
                .put(customers::update::<R>)
                .delete(customers::delete::<R>),
        )
}
