//! Storage selection and service wiring.

use std::sync::Arc;

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use tracing::info;

use clientele_infra::{
    CustomerDirectory, CustomerService, InMemoryCustomerDirectory, PostgresCustomerDirectory,
};

use crate::config::ApiConfig;

pub type Customers = CustomerService<Arc<dyn CustomerDirectory>>;

/// Everything the handlers need, shared behind one `Arc`.
pub struct AppServices {
    pub customers: Customers,
}

impl AppServices {
    pub fn new(directory: Arc<dyn CustomerDirectory>) -> Self {
        Self {
            customers: CustomerService::new(directory),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryCustomerDirectory::new()))
    }
}

/// Pick the customer directory from config: Postgres when `DATABASE_URL` is set,
/// in-memory otherwise.
pub async fn build_services(config: &ApiConfig) -> anyhow::Result<AppServices> {
    let Some(database_url) = config.database_url.as_deref() else {
        info!("using in-memory customer directory");
        return Ok(AppServices::in_memory());
    };

    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(database_url)
        .await
        .context("failed to connect to Postgres")?;

    let directory = PostgresCustomerDirectory::new(pool);
    directory
        .ensure_schema()
        .await
        .context("failed to prepare customers table")?;

    info!(
        max_connections = config.database_max_connections,
        "using Postgres customer directory"
    );
    Ok(AppServices::new(Arc::new(directory)))
}
