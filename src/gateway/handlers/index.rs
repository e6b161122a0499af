//! Service description handler

use axum::Json;
use utoipa::ToSchema;

use super::super::types::ApiResult;

/// Root URL response
#[derive(serde::Serialize, serde::Deserialize, ToSchema)]
pub struct IndexResponse {
    #[schema(example = "Order REST API Service")]
    pub name: String,
    #[schema(example = "0.1.0")]
    pub version: String,
    /// Build identifier (commit hash or `ORDER_SERVICE_BUILD`)
    #[schema(example = "3f2a9c1")]
    pub build: String,
    /// Path of the order collection
    #[schema(example = "/orders")]
    pub paths: String,
}

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service name, version and entry path", body = IndexResponse)
    ),
    tag = "System"
)]
pub async fn index() -> ApiResult<Json<IndexResponse>> {
    tracing::info!("Request for Root URL");
    Ok(Json(IndexResponse {
        name: "Order REST API Service".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        build: env!("ORDER_SERVICE_BUILD_ID").to_string(),
        paths: "/orders".to_string(),
    }))
}
