//! `SQLite` implementation of [`CustomerRepository`].

use std::future::Future;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use crm_app::ports::CustomerRepository;
use crm_domain::customer::Customer;
use crm_domain::error::{CrmError, EmailUnavailableError};
use crm_domain::id::CustomerId;

use crate::error::StorageError;

/// Wrapper for converting database rows into domain types without polluting
/// domain structs with database concerns.
struct Wrapper(Customer);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<Customer> {
        value.map(|w| w.0)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: i64 = row.try_get("id")?;
        let name: String = row.try_get("name")?;
        let email: String = row.try_get("email")?;
        let address: String = row.try_get("address")?;

        Ok(Self(Customer {
            id: Some(CustomerId::new(id)),
            name,
            email,
            address,
        }))
    }
}

const INSERT: &str = "INSERT INTO customers (name, email, address) VALUES (?, ?, ?)";
const UPSERT: &str = "INSERT INTO customers (id, name, email, address) VALUES (?, ?, ?, ?) \
     ON CONFLICT(id) DO UPDATE SET name = excluded.name, email = excluded.email, address = excluded.address";
const SELECT_ALL: &str = "SELECT * FROM customers ORDER BY id";
const SELECT_BY_ID: &str = "SELECT * FROM customers WHERE id = ?";
const SELECT_BY_EMAIL: &str = "SELECT * FROM customers WHERE email = ?";
const COUNT_BY_ID: &str = "SELECT COUNT(*) FROM customers WHERE id = ?";
const DELETE_BY_ID: &str = "DELETE FROM customers WHERE id = ?";
const DELETE_ALL: &str = "DELETE FROM customers";

/// Turn a failed write into the domain conflict when the unique email
/// index rejected it.
fn save_error(err: sqlx::Error, conflict: EmailUnavailableError) -> CrmError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            tracing::debug!(error = %db, "unique email index rejected write");
            conflict.into()
        }
        _ => StorageError::from(err).into(),
    }
}

/// `SQLite`-backed customer repository.
pub struct SqliteCustomerRepository {
    pool: SqlitePool,
}

impl SqliteCustomerRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl CustomerRepository for SqliteCustomerRepository {
    fn find_all(&self) -> impl Future<Output = Result<Vec<Customer>, CrmError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ALL)
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }

    fn find_by_id(
        &self,
        id: CustomerId,
    ) -> impl Future<Output = Result<Option<Customer>, CrmError>> + Send {
        let pool = self.pool.clone();
        async move {
            let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
                .bind(id.as_i64())
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(Wrapper::maybe(row))
        }
    }

    fn find_by_email(
        &self,
        email: &str,
    ) -> impl Future<Output = Result<Option<Customer>, CrmError>> + Send {
        let pool = self.pool.clone();
        let email = email.to_string();
        async move {
            let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_EMAIL)
                .bind(email)
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(Wrapper::maybe(row))
        }
    }

    fn save(&self, customer: Customer) -> impl Future<Output = Result<Customer, CrmError>> + Send {
        let pool = self.pool.clone();
        async move {
            if let Some(id) = customer.id {
                sqlx::query(UPSERT)
                    .bind(id.as_i64())
                    .bind(&customer.name)
                    .bind(&customer.email)
                    .bind(&customer.address)
                    .execute(&pool)
                    .await
                    .map_err(|err| {
                        save_error(
                            err,
                            EmailUnavailableError::Update {
                                email: customer.email.clone(),
                            },
                        )
                    })?;

                return Ok(customer);
            }

            let result = sqlx::query(INSERT)
                .bind(&customer.name)
                .bind(&customer.email)
                .bind(&customer.address)
                .execute(&pool)
                .await
                .map_err(|err| {
                    save_error(
                        err,
                        EmailUnavailableError::Create {
                            email: customer.email.clone(),
                        },
                    )
                })?;

            Ok(customer.with_id(CustomerId::new(result.last_insert_rowid())))
        }
    }

    fn exists_by_id(&self, id: CustomerId) -> impl Future<Output = Result<bool, CrmError>> + Send {
        let pool = self.pool.clone();
        async move {
            let count: i64 = sqlx::query_scalar(COUNT_BY_ID)
                .bind(id.as_i64())
                .fetch_one(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(count > 0)
        }
    }

    fn delete_by_id(&self, id: CustomerId) -> impl Future<Output = Result<(), CrmError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(DELETE_BY_ID)
                .bind(id.as_i64())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(())
        }
    }

    fn delete_all(&self) -> impl Future<Output = Result<(), CrmError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(DELETE_ALL)
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(())
        }
    }
}
