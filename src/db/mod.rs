//! Database connection management

use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;

use crate::config::DatabaseConfig;

/// `orders` table and its search indexes, applied at startup
const SCHEMA: &[&str] = &[
    r#"CREATE TABLE IF NOT EXISTS orders (
           id       BIGSERIAL PRIMARY KEY,
           customer VARCHAR(64) NOT NULL,
           total    NUMERIC(14, 2) NOT NULL CHECK (total >= 0),
           status   VARCHAR(16) NOT NULL,
           date     DATE NOT NULL
       )"#,
    "CREATE INDEX IF NOT EXISTS idx_orders_customer ON orders (customer)",
    "CREATE INDEX IF NOT EXISTS idx_orders_status ON orders (status)",
    "CREATE INDEX IF NOT EXISTS idx_orders_date ON orders (date)",
];

/// PostgreSQL database connection pool
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Create a new database connection pool
    pub async fn connect(database_url: &str, config: &DatabaseConfig) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
            .connect(database_url)
            .await?;

        tracing::info!(
            max_connections = config.max_connections,
            "PostgreSQL connection pool established"
        );
        Ok(Self { pool })
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Check database health
    pub async fn health_check(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Create the `orders` table and indexes if they do not exist yet
    pub async fn init_schema(&self) -> Result<(), sqlx::Error> {
        for statement in SCHEMA {
            sqlx::query(*statement).execute(&self.pool).await?;
        }
        tracing::info!("Order schema initialized");
        Ok(())
    }
}
