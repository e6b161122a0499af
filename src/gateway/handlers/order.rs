//! Order handlers (list, create, get, update, delete, cancel)

use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    http::{StatusCode, header},
};

use crate::orders::{Order, OrderStatus};

use super::super::state::AppState;
use super::super::types::{
    ApiError, ApiResult, ErrorResponse, OrderBody, OrderIdPath, OrderQuery, OrderQueryParams,
    OrderRequest, ValidatedOrder,
};

/// Location of a single order resource
pub fn order_location(id: i64) -> String {
    format!("/orders/{}", id)
}

fn not_found(id: i64) -> ApiError {
    ApiError::not_found(format!("Order with id '{}' was not found.", id))
}

/// List / search orders
///
/// GET /orders?customer=&status=&date=
#[utoipa::path(
    get,
    path = "/orders",
    params(OrderQueryParams),
    responses(
        (status = 200, description = "Orders matching every given filter, by ascending id", body = Vec<Order>),
        (status = 400, description = "Invalid filter value", body = ErrorResponse)
    ),
    tag = "Orders"
)]
pub async fn list_orders(
    State(state): State<Arc<AppState>>,
    OrderQuery(filter): OrderQuery,
) -> ApiResult<Json<Vec<Order>>> {
    tracing::info!(?filter, "Request for order list");

    let orders = state.store.list(&filter).await?;
    tracing::info!("Returning {} orders", orders.len());
    Ok(Json(orders))
}

/// Create an order
///
/// POST /orders
#[utoipa::path(
    post,
    path = "/orders",
    request_body(content = OrderRequest, content_type = "application/json"),
    responses(
        (status = 201, description = "Order created", body = Order,
            headers(("Location" = String, description = "URL of the new order"))),
        (status = 400, description = "Missing or invalid field", body = ErrorResponse),
        (status = 415, description = "Body is not JSON", body = ErrorResponse)
    ),
    tag = "Orders"
)]
pub async fn create_order(
    State(state): State<Arc<AppState>>,
    ValidatedOrder(fields): ValidatedOrder,
) -> ApiResult<(StatusCode, [(header::HeaderName, String); 1], Json<Order>)> {
    tracing::info!(customer = %fields.customer, "Request to create an order");

    let order = state.store.create(&fields).await?;
    tracing::info!("Order with id [{}] created", order.id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, order_location(order.id))],
        Json(order),
    ))
}

/// Retrieve an order
///
/// GET /orders/{id}
#[utoipa::path(
    get,
    path = "/orders/{id}",
    params(("id" = i64, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Order details", body = Order),
        (status = 404, description = "Order not found", body = ErrorResponse)
    ),
    tag = "Orders"
)]
pub async fn get_order(
    State(state): State<Arc<AppState>>,
    OrderIdPath(id): OrderIdPath,
) -> ApiResult<Json<Order>> {
    tracing::info!("Request for order with id: {}", id);

    match state.store.get(id).await? {
        Some(order) => Ok(Json(order)),
        None => not_found(id).into_err(),
    }
}

/// Replace every field of an order
///
/// PUT /orders/{id}. An unknown id answers 404 before the body is validated.
#[utoipa::path(
    put,
    path = "/orders/{id}",
    params(("id" = i64, Path, description = "Order ID")),
    request_body(content = OrderRequest, content_type = "application/json"),
    responses(
        (status = 200, description = "Updated order", body = Order),
        (status = 400, description = "Missing or invalid field", body = ErrorResponse),
        (status = 404, description = "Order not found", body = ErrorResponse),
        (status = 415, description = "Body is not JSON", body = ErrorResponse)
    ),
    tag = "Orders"
)]
pub async fn update_order(
    State(state): State<Arc<AppState>>,
    OrderIdPath(id): OrderIdPath,
    body: OrderBody,
) -> ApiResult<Json<Order>> {
    tracing::info!("Request to update order with id: {}", id);

    if state.store.get(id).await?.is_none() {
        return not_found(id).into_err();
    }
    let fields = body.validate()?;

    match state.store.update(id, &fields).await? {
        Some(order) => {
            tracing::info!("Order with id [{}] updated", id);
            Ok(Json(order))
        }
        None => not_found(id).into_err(),
    }
}

/// Delete an order
///
/// DELETE /orders/{id}. Answers 204 whether or not the order existed.
#[utoipa::path(
    delete,
    path = "/orders/{id}",
    params(("id" = i64, Path, description = "Order ID")),
    responses(
        (status = 204, description = "Order deleted or already absent")
    ),
    tag = "Orders"
)]
pub async fn delete_order(
    State(state): State<Arc<AppState>>,
    OrderIdPath(id): OrderIdPath,
) -> ApiResult<StatusCode> {
    tracing::info!("Request to delete order with id: {}", id);

    let existed = state.store.delete(id).await?;
    tracing::info!(existed, "Order with id [{}] delete complete", id);
    Ok(StatusCode::NO_CONTENT)
}

/// Cancel an order
///
/// PUT or POST /orders/{id}/cancel. Sets status to Cancelled from any status.
#[utoipa::path(
    put,
    path = "/orders/{id}/cancel",
    params(("id" = i64, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Cancelled order", body = Order),
        (status = 404, description = "Order not found", body = ErrorResponse)
    ),
    tag = "Orders"
)]
pub async fn cancel_order(
    State(state): State<Arc<AppState>>,
    OrderIdPath(id): OrderIdPath,
) -> ApiResult<Json<Order>> {
    tracing::info!("Request to cancel order with id: {}", id);

    match state.store.update_status(id, OrderStatus::Cancelled).await? {
        Some(order) => {
            tracing::info!("Order with id [{}] cancelled", id);
            Ok(Json(order))
        }
        None => not_found(id).into_err(),
    }
}
