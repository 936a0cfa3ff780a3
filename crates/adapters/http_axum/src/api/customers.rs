//! JSON REST handlers for customers.

use std::str::FromStr;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use crm_app::ports::CustomerRepository;
use crm_domain::customer::{Customer, CustomerPatch};
use crm_domain::id::CustomerId;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for creating a customer.
#[derive(Deserialize)]
pub struct CreateCustomerRequest {
    pub name: String,
    pub email: String,
    pub address: String,
}

/// Query parameters for a partial update. Absent parameters are left
/// unchanged; `?name=` sets the name to the empty string.
#[derive(Deserialize)]
pub struct UpdateCustomerParams {
    pub name: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
}

impl From<UpdateCustomerParams> for CustomerPatch {
    fn from(params: UpdateCustomerParams) -> Self {
        Self {
            name: params.name,
            email: params.email,
            address: params.address,
        }
    }
}

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<Customer>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the get, create and update endpoints.
pub enum CustomerResponse {
    Ok(Json<Customer>),
}

impl IntoResponse for CustomerResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the delete endpoint.
pub enum DeleteResponse {
    Ok,
}

impl IntoResponse for DeleteResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok => StatusCode::OK.into_response(),
        }
    }
}

fn parse_id(raw: &str) -> Result<CustomerId, ApiError> {
    CustomerId::from_str(raw).map_err(|_| ApiError::InvalidId(raw.to_string()))
}

/// `GET /api/v1/customers`
pub async fn list<R>(State(state): State<AppState<R>>) -> Result<ListResponse, ApiError>
where
    R: CustomerRepository + Send + Sync + 'static,
{
    let customers = state.customer_service.get_customers().await?;
    Ok(ListResponse::Ok(Json(customers)))
}

/// `GET /api/v1/customers/:id`
pub async fn get<R>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
) -> Result<CustomerResponse, ApiError>
where
    R: CustomerRepository + Send + Sync + 'static,
{
    let customer_id = parse_id(&id)?;
    let customer = state.customer_service.get_customer(customer_id).await?;
    Ok(CustomerResponse::Ok(Json(customer)))
}

/// `POST /api/v1/customers`
pub async fn create<R>(
    State(state): State<AppState<R>>,
    payload: Result<Json<CreateCustomerRequest>, JsonRejection>,
) -> Result<CustomerResponse, ApiError>
where
    R: CustomerRepository + Send + Sync + 'static,
{
    let Json(req) = payload?;
    let created = state
        .customer_service
        .create_customer(req.name, req.email, req.address)
        .await?;
    Ok(CustomerResponse::Ok(Json(created)))
}

/// `PUT /api/v1/customers/:id?name=&email=&address=`
pub async fn update<R>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
    Query(params): Query<UpdateCustomerParams>,
) -> Result<CustomerResponse, ApiError>
where
    R: CustomerRepository + Send + Sync + 'static,
{
    let customer_id = parse_id(&id)?;
    let updated = state
        .customer_service
        .update_customer(customer_id, params.into())
        .await?;
    Ok(CustomerResponse::Ok(Json(updated)))
}

/// `DELETE /api/v1/customers/:id`
pub async fn delete<R>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
) -> Result<DeleteResponse, ApiError>
where
    R: CustomerRepository + Send + Sync + 'static,
{
    let customer_id = parse_id(&id)?;
    state.customer_service.delete_customer(customer_id).await?;
    Ok(DeleteResponse::Ok)
}
