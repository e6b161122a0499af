//! HTTP handlers
//!
//! - [`order`]: order CRUD, search and cancel
//! - [`health`]: store health check
//! - [`index`]: service description

pub mod health;
pub mod index;
pub mod order;

pub use health::{HealthResponse, health_check};
pub use index::{IndexResponse, index};
pub use order::{cancel_order, create_order, delete_order, get_order, list_orders, update_order};
