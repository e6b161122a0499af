//! PostgreSQL order store

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{Postgres, QueryBuilder, Row};

use super::models::{Order, OrderFields, OrderFilter, OrderId, OrderStatus};
use super::{OrderStore, StoreError};
use crate::db::Database;

/// Order store over the `orders` table
pub struct PgOrderStore {
    db: Database,
}

impl PgOrderStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    fn row_to_order(row: &PgRow) -> Result<Order, StoreError> {
        let status_text: String = row.try_get("status")?;
        let status = match status_text.parse::<OrderStatus>() {
            Ok(status) => status,
            Err(_) => {
                return Err(StoreError::CorruptRow {
                    column: "status",
                    value: status_text,
                });
            }
        };

        Ok(Order {
            id: row.try_get("id")?,
            customer: row.try_get("customer")?,
            total: row.try_get("total")?,
            status,
            date: row.try_get("date")?,
        })
    }
}

#[async_trait]
impl OrderStore for PgOrderStore {
    fn backend(&self) -> &'static str {
        "postgres"
    }

    async fn create(&self, fields: &OrderFields) -> Result<Order, StoreError> {
        let row = sqlx::query(
            r#"
            INSERT INTO orders (customer, total, status, date)
            VALUES ($1, $2, $3, $4)
            RETURNING id, customer, total, status, date
            "#,
        )
        .bind(&fields.customer)
        .bind(fields.total)
        .bind(fields.status.as_str())
        .bind(fields.date)
        .fetch_one(self.db.pool())
        .await?;

        Self::row_to_order(&row)
    }

    async fn get(&self, id: OrderId) -> Result<Option<Order>, StoreError> {
        let row = sqlx::query(
            r#"SELECT id, customer, total, status, date
               FROM orders WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(self.db.pool())
        .await?;

        row.as_ref().map(Self::row_to_order).transpose()
    }

    async fn update(
        &self,
        id: OrderId,
        fields: &OrderFields,
    ) -> Result<Option<Order>, StoreError> {
        let row = sqlx::query(
            r#"
            UPDATE orders
            SET customer = $1, total = $2, status = $3, date = $4
            WHERE id = $5
            RETURNING id, customer, total, status, date
            "#,
        )
        .bind(&fields.customer)
        .bind(fields.total)
        .bind(fields.status.as_str())
        .bind(fields.date)
        .bind(id)
        .fetch_optional(self.db.pool())
        .await?;

        row.as_ref().map(Self::row_to_order).transpose()
    }

    async fn update_status(
        &self,
        id: OrderId,
        status: OrderStatus,
    ) -> Result<Option<Order>, StoreError> {
        let row = sqlx::query(
            r#"
            UPDATE orders SET status = $1
            WHERE id = $2
            RETURNING id, customer, total, status, date
            "#,
        )
        .bind(status.as_str())
        .bind(id)
        .fetch_optional(self.db.pool())
        .await?;

        row.as_ref().map(Self::row_to_order).transpose()
    }

    async fn delete(&self, id: OrderId) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM orders WHERE id = $1")
            .bind(id)
            .execute(self.db.pool())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list(&self, filter: &OrderFilter) -> Result<Vec<Order>, StoreError> {
        let mut query: QueryBuilder<Postgres> =
            QueryBuilder::new("SELECT id, customer, total, status, date FROM orders");

        let mut separator = " WHERE ";
        if let Some(customer) = &filter.customer {
            query.push(separator).push("customer = ").push_bind(customer.clone());
            separator = " AND ";
        }
        if let Some(status) = filter.status {
            query.push(separator).push("status = ").push_bind(status.as_str());
            separator = " AND ";
        }
        if let Some(date) = filter.date {
            query.push(separator).push("date = ").push_bind(date);
        }
        query.push(" ORDER BY id");

        let rows = query.build().fetch_all(self.db.pool()).await?;
        rows.iter().map(Self::row_to_order).collect()
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.db.health_check().await?;
        Ok(())
    }
}
