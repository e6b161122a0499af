//! OpenAPI / Swagger UI Documentation
//!
//! - Swagger UI: `http://localhost:8080/docs`
//! - OpenAPI JSON: `http://localhost:8080/api-docs/openapi.json`

use utoipa::OpenApi;

use crate::gateway::handlers::{HealthResponse, IndexResponse};
use crate::gateway::types::{ErrorResponse, OrderRequest};
use crate::orders::{Order, OrderStatus};

/// Main API Documentation struct
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Order REST API",
        version = "1.0.0",
        description = "Create, retrieve, update, delete, search and cancel store orders.",
        license(
            name = "MIT"
        )
    ),
    servers(
        (url = "http://localhost:8080", description = "Development"),
    ),
    paths(
        crate::gateway::handlers::index::index,
        crate::gateway::handlers::health::health_check,
        crate::gateway::handlers::order::list_orders,
        crate::gateway::handlers::order::create_order,
        crate::gateway::handlers::order::get_order,
        crate::gateway::handlers::order::update_order,
        crate::gateway::handlers::order::delete_order,
        crate::gateway::handlers::order::cancel_order,
    ),
    components(
        schemas(
            Order,
            OrderStatus,
            OrderRequest,
            ErrorResponse,
            HealthResponse,
            IndexResponse,
        )
    ),
    tags(
        (name = "System", description = "Service description and health"),
        (name = "Orders", description = "Order records"),
    )
)]
pub struct ApiDoc;
