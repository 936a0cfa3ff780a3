//! # crm-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve the **JSON REST API** under `/api/v1/customers`
//! - Map HTTP requests into application service calls (driving adapter)
//! - Map application results and domain errors into HTTP responses
//!
//! ## Dependency rule
//! Depends on `crm-app` (for port traits and services) and `crm-domain`
//! (for domain types used in request/response mapping). Never leaks axum types
//! into the domain.

pub mod api;
pub mod error;
pub mod router;
pub mod state;
