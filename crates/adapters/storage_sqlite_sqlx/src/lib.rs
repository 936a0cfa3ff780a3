//! # crm-adapter-storage-sqlite-sqlx
//!
//! `SQLite` persistence adapter using [sqlx](https://docs.rs/sqlx).
//!
//! ## Responsibilities
//! - Implement the `CustomerRepository` port defined in `crm-app::ports::storage`
//! - Manage `SQLite` connection pool lifecycle
//! - Run database migrations (using sqlx embedded migrations)
//! - Map between domain types and database rows
//!
//! ## Dependency rule
//! Depends on `crm-app` (for port traits) and `crm-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

mod customer_repo;
mod error;
mod pool;

pub use customer_repo::SqliteCustomerRepository;
pub use error::StorageError;
pub use pool::{Config, DEFAULT_MAX_CONNECTIONS, Database};
