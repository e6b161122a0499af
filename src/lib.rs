//! Order Service - REST API for store orders
//!
//! Create, retrieve, update, delete and search orders by customer, status
//! or date, plus a cancel action.
//!
//! # Modules
//!
//! - [`orders`] - Order records and the `OrderStore` trait (PostgreSQL and in-memory)
//! - [`gateway`] - Axum HTTP layer: routes, validation, error responses, OpenAPI
//! - [`db`] - PostgreSQL connection pool and schema
//! - [`config`] - YAML application configuration
//! - [`logging`] - tracing subscriber setup

pub mod config;
pub mod db;
pub mod gateway;
pub mod logging;
pub mod orders;

// Convenient re-exports at crate root
pub use config::AppConfig;
pub use gateway::state::AppState;
pub use orders::{
    MemoryOrderStore, Order, OrderFields, OrderFilter, OrderId, OrderStatus, OrderStore,
    PgOrderStore, StoreError,
};
