//! Order record store
//!
//! Single-table CRUD and exact-match search for orders. The store is an
//! explicitly constructed handle shared through the gateway state.
//!
//! - [`PgOrderStore`]: PostgreSQL `orders` table
//! - [`MemoryOrderStore`]: in-process store for tests and database-less dev runs

pub mod error;
pub mod memory;
pub mod models;
pub mod repository;

pub use error::StoreError;
pub use memory::MemoryOrderStore;
pub use models::{Order, OrderFields, OrderFilter, OrderId, OrderStatus, UnknownStatus};
pub use repository::PgOrderStore;

use async_trait::async_trait;

/// Order persistence
///
/// Every method commits on its own; there are no multi-order transactions.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Backend name for logging and health output
    fn backend(&self) -> &'static str;

    /// Insert a new order and return it with its assigned id
    async fn create(&self, fields: &OrderFields) -> Result<Order, StoreError>;

    async fn get(&self, id: OrderId) -> Result<Option<Order>, StoreError>;

    /// Replace every mutable field; the id is kept. `None` if `id` is unknown.
    async fn update(&self, id: OrderId, fields: &OrderFields)
    -> Result<Option<Order>, StoreError>;

    /// Set only the status. `None` if `id` is unknown.
    async fn update_status(
        &self,
        id: OrderId,
        status: OrderStatus,
    ) -> Result<Option<Order>, StoreError>;

    /// Remove an order. Returns whether a row existed; deleting an unknown id is not an error.
    async fn delete(&self, id: OrderId) -> Result<bool, StoreError>;

    /// Orders matching every constraint in `filter`, ordered by id
    async fn list(&self, filter: &OrderFilter) -> Result<Vec<Order>, StoreError>;

    /// Check that the backend is reachable
    async fn ping(&self) -> Result<(), StoreError>;
}
