//! # crm-domain
//!
//! Pure domain model for the crm customer-management service.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers and error conventions
//! - Define the **Customer** (a named, addressed party identified by a unique email)
//! - Define the **CustomerPatch** (a partial update with per-field presence)
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;

pub mod customer;
