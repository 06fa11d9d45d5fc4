//! Postgres-backed customer directory.
//!
//! ## Error Mapping
//!
//! | SQLx Error | PostgreSQL Error Code | DirectoryError |
//! |------------|----------------------|----------------|
//! | Database (unique violation) | `23505` | `Conflict` |
//! | Database (other) | any other | `Unavailable` |
//! | PoolClosed / network / decode | N/A | `Unavailable` |
//!
//! `PostgresCustomerDirectory` is `Send + Sync`; the SQLx pool handles
//! connection management.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::postgres::{PgPool, PgRow};
use sqlx::Row;
use tracing::instrument;
use uuid::Uuid;

use clientele_core::{CustomerId, Entity};
use clientele_customers::{Customer, CustomerDraft};

use super::r#trait::{CustomerDirectory, DirectoryError};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS customers (
    id                 UUID PRIMARY KEY,
    name               VARCHAR(100) NOT NULL,
    email              VARCHAR(255) NOT NULL UNIQUE,
    annual_spend       NUMERIC(10, 2),
    last_purchase_date DATE,
    created_at         TIMESTAMPTZ NOT NULL DEFAULT now()
);
CREATE INDEX IF NOT EXISTS customers_name_idx ON customers (name, created_at);
"#;

const COLUMNS: &str = "id, name, email, annual_spend, last_purchase_date";

/// Postgres customer directory backed by the `customers` table.
#[derive(Debug, Clone)]
pub struct PostgresCustomerDirectory {
    pool: Arc<PgPool>,
}

impl PostgresCustomerDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }

    /// Create the `customers` table and its indexes when missing.
    pub async fn ensure_schema(&self) -> Result<(), DirectoryError> {
        sqlx::raw_sql(SCHEMA)
            .execute(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("ensure_schema", e))?;
        Ok(())
    }

    async fn fetch_one_where(
        &self,
        operation: &str,
        predicate: &str,
        value: &str,
    ) -> Result<Option<Customer>, DirectoryError> {
        let sql = format!(
            "SELECT {COLUMNS} FROM customers WHERE {predicate} = $1 ORDER BY created_at, id LIMIT 1"
        );
        let row = sqlx::query(&sql)
            .bind(value)
            .fetch_optional(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error(operation, e))?;

        row.map(|r| row_to_customer(&r)).transpose()
    }
}

#[async_trait]
impl CustomerDirectory for PostgresCustomerDirectory {
    #[instrument(skip(self, draft), err)]
    async fn insert(&self, draft: CustomerDraft) -> Result<Customer, DirectoryError> {
        let customer = Customer::new(CustomerId::new(), draft);
        let id: Uuid = (*customer.id()).into();

        sqlx::query(
            r#"
            INSERT INTO customers (id, name, email, annual_spend, last_purchase_date)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(id)
        .bind(customer.name())
        .bind(customer.email())
        .bind(customer.annual_spend())
        .bind(customer.last_purchase_date())
        .execute(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("insert", e))?;

        Ok(customer)
    }

    #[instrument(skip(self), fields(customer_id = %id), err)]
    async fn find_by_id(&self, id: CustomerId) -> Result<Option<Customer>, DirectoryError> {
        let sql = format!("SELECT {COLUMNS} FROM customers WHERE id = $1");
        let row = sqlx::query(&sql)
            .bind(id.as_uuid())
            .fetch_optional(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("find_by_id", e))?;

        row.map(|r| row_to_customer(&r)).transpose()
    }

    #[instrument(skip(self), err)]
    async fn find_by_name(&self, name: &str) -> Result<Option<Customer>, DirectoryError> {
        self.fetch_one_where("find_by_name", "name", name).await
    }

    #[instrument(skip(self), err)]
    async fn find_by_email(&self, email: &str) -> Result<Option<Customer>, DirectoryError> {
        self.fetch_one_where("find_by_email", "email", email).await
    }

    #[instrument(skip(self, customer), fields(customer_id = %customer.id()), err)]
    async fn update(&self, customer: Customer) -> Result<Customer, DirectoryError> {
        let id: Uuid = (*customer.id()).into();
        let result = sqlx::query(
            r#"
            UPDATE customers
            SET name = $2, email = $3, annual_spend = $4, last_purchase_date = $5
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(customer.name())
        .bind(customer.email())
        .bind(customer.annual_spend())
        .bind(customer.last_purchase_date())
        .execute(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("update", e))?;

        if result.rows_affected() == 0 {
            return Err(DirectoryError::Missing(*customer.id()));
        }
        Ok(customer)
    }

    #[instrument(skip(self), fields(customer_id = %id), err)]
    async fn exists_by_id(&self, id: CustomerId) -> Result<bool, DirectoryError> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM customers WHERE id = $1)")
            .bind(id.as_uuid())
            .fetch_one(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("exists_by_id", e))?;
        Ok(exists)
    }

    #[instrument(skip(self), fields(customer_id = %id), err)]
    async fn delete_by_id(&self, id: CustomerId) -> Result<(), DirectoryError> {
        sqlx::query("DELETE FROM customers WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("delete_by_id", e))?;
        Ok(())
    }
}

fn row_to_customer(row: &PgRow) -> Result<Customer, DirectoryError> {
    let decode = |e: sqlx::Error| map_sqlx_error("decode_row", e);

    let id: Uuid = row.try_get("id").map_err(decode)?;
    let name: String = row.try_get("name").map_err(decode)?;
    let email: String = row.try_get("email").map_err(decode)?;
    let annual_spend: Option<Decimal> = row.try_get("annual_spend").map_err(decode)?;
    let last_purchase_date: Option<NaiveDate> = row.try_get("last_purchase_date").map_err(decode)?;

    Ok(Customer::restore(
        CustomerId::from_uuid(id),
        name,
        email,
        annual_spend,
        last_purchase_date,
    ))
}

fn map_sqlx_error(operation: &str, err: sqlx::Error) -> DirectoryError {
    match err {
        sqlx::Error::Database(db_err) => {
            let msg = format!("database error in {}: {}", operation, db_err.message());
            match db_err.code().as_deref() {
                Some("23505") => DirectoryError::Conflict(msg),
                _ => DirectoryError::Unavailable(msg),
            }
        }
        sqlx::Error::PoolClosed => {
            DirectoryError::Unavailable(format!("connection pool closed in {operation}"))
        }
        _ => DirectoryError::Unavailable(format!("sqlx error in {operation}: {err}")),
    }
}

#[cfg(test)]
mod tests {
    use std::borrow::Cow;
    use std::error::Error as StdError;
    use std::fmt;

    use sqlx::error::{DatabaseError, ErrorKind};
    use sqlx::postgres::PgPoolOptions;

    use clientele_customers::{CustomerRequest, validate_request};

    use super::*;

    /// Minimal database error carrying a chosen SQLSTATE.
    #[derive(Debug)]
    struct SqlState(&'static str);

    impl fmt::Display for SqlState {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "sqlstate {}", self.0)
        }
    }

    impl StdError for SqlState {}

    impl DatabaseError for SqlState {
        fn message(&self) -> &str {
            "duplicate key value violates unique constraint \"customers_email_key\""
        }

        fn code(&self) -> Option<Cow<'_, str>> {
            Some(Cow::Borrowed(self.0))
        }

        fn as_error(&self) -> &(dyn StdError + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn StdError + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn StdError + Send + Sync + 'static> {
            self
        }

        fn kind(&self) -> ErrorKind {
            match self.0 {
                "23505" => ErrorKind::UniqueViolation,
                _ => ErrorKind::Other,
            }
        }
    }

    fn database_error(code: &'static str) -> sqlx::Error {
        sqlx::Error::Database(Box::new(SqlState(code)))
    }

    #[test]
    fn unique_violation_is_conflict() {
        let err = map_sqlx_error("insert", database_error("23505"));
        assert!(matches!(err, DirectoryError::Conflict(msg) if msg.contains("insert")));
    }

    #[test]
    fn other_database_errors_are_unavailable() {
        for code in ["23502", "40001", "57P01"] {
            let err = map_sqlx_error("update", database_error(code));
            assert!(matches!(err, DirectoryError::Unavailable(_)), "{code}");
        }
    }

    #[test]
    fn pool_closed_is_unavailable() {
        let err = map_sqlx_error("insert", sqlx::Error::PoolClosed);
        assert!(matches!(err, DirectoryError::Unavailable(msg) if msg.contains("insert")));
    }

    #[test]
    fn row_not_found_is_unavailable() {
        let err = map_sqlx_error("find_by_id", sqlx::Error::RowNotFound);
        assert!(matches!(err, DirectoryError::Unavailable(_)));
    }

    // Live database checks; they run only when DATABASE_URL points at a
    // Postgres instance.

    async fn live_directory() -> Option<PostgresCustomerDirectory> {
        let url = std::env::var("DATABASE_URL").ok().filter(|u| !u.trim().is_empty())?;
        let pool = PgPoolOptions::new()
            .max_connections(2)
            .connect(&url)
            .await
            .expect("DATABASE_URL is set but Postgres is unreachable");
        let directory = PostgresCustomerDirectory::new(pool);
        directory.ensure_schema().await.unwrap();
        Some(directory)
    }

    fn unique(label: &str) -> String {
        format!("{label}-{}", Uuid::now_v7().simple())
    }

    fn draft(name: &str, email: &str) -> CustomerDraft {
        validate_request(&CustomerRequest {
            name: Some(name.to_string()),
            email: Some(email.to_string()),
            annual_spend: Some("10.5".parse().unwrap()),
            ..CustomerRequest::default()
        })
        .unwrap()
    }

    #[tokio::test]
    async fn live_duplicate_email_is_conflict() {
        let Some(dir) = live_directory().await else {
            return;
        };
        let email = format!("{}@example.com", unique("dup"));

        let first = dir.insert(draft("Ada", &email)).await.unwrap();
        let err = dir.insert(draft("Other Ada", &email)).await.unwrap_err();
        assert!(matches!(err, DirectoryError::Conflict(_)));

        let stored = dir.find_by_email(&email).await.unwrap().unwrap();
        assert_eq!(stored, first);
        dir.delete_by_id(*first.id()).await.unwrap();
    }

    #[tokio::test]
    async fn live_shared_name_resolves_to_first_inserted() {
        let Some(dir) = live_directory().await else {
            return;
        };
        let name = unique("sam");

        let first = dir
            .insert(draft(&name, &format!("{}@example.com", unique("sam1"))))
            .await
            .unwrap();
        let second = dir
            .insert(draft(&name, &format!("{}@example.com", unique("sam2"))))
            .await
            .unwrap();

        let found = dir.find_by_name(&name).await.unwrap().unwrap();
        assert_eq!(found.id(), first.id());

        dir.delete_by_id(*first.id()).await.unwrap();
        dir.delete_by_id(*second.id()).await.unwrap();
    }

    #[tokio::test]
    async fn live_update_after_delete_is_missing() {
        let Some(dir) = live_directory().await else {
            return;
        };
        let customer = dir
            .insert(draft("Ada", &format!("{}@example.com", unique("gone"))))
            .await
            .unwrap();
        dir.delete_by_id(*customer.id()).await.unwrap();

        let id = *customer.id();
        let err = dir.update(customer).await.unwrap_err();
        assert!(matches!(err, DirectoryError::Missing(missing) if missing == id));
        assert!(!dir.exists_by_id(id).await.unwrap());
    }
}
