//! # crm-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `CustomerRepository` — persistence boundary for customers
//! - Define **driving/inbound ports** as use-case structs:
//!   - `CustomerService` — list, get, create, partially update, delete
//! - Enforce the email-uniqueness and existence rules before any store mutation
//!
//! ## Dependency rule
//! Depends on `crm-domain` only.
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod services;
