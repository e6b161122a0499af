//! Gateway types module
//!
//! ## Input Types
//! - [`OrderRequest`]: loosely typed order body
//! - [`OrderBody`]: Axum extractor holding a JSON body, validated on demand
//! - [`ValidatedOrder`]: Axum extractor yielding validated `OrderFields`
//! - [`OrderIdPath`]: Axum extractor for the `{id}` path segment
//! - [`OrderQuery`]: Axum extractor for list/search filters
//!
//! ## Output Types
//! - [`ApiError`] / [`ErrorResponse`]: error responses
//!
//! ## Submodules
//! - [`order`]: Order request types and validation
//! - [`response`]: Error type and error codes

pub mod order;
pub mod response;

pub use order::{
    OrderBody, OrderIdPath, OrderQuery, OrderQueryParams, OrderRequest, OrderValidationError,
    ValidatedOrder, validate_order_request,
};
pub use response::{ApiError, ApiResult, ErrorResponse, error_codes};
