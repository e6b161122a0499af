//! Order request types and validation
//!
//! - `OrderRequest`: loosely typed HTTP body, one JSON value per field
//! - `validate_order_request`: schema check into a typed `OrderFields`
//! - `OrderBody`: Axum extractor holding a JSON body for deferred validation
//! - `ValidatedOrder`: Axum extractor running both steps
//! - `OrderIdPath`: Axum extractor for the `{id}` path segment
//! - `OrderQuery`: Axum extractor for the list/search query string

use std::str::FromStr;

use axum::body::Bytes;
use axum::extract::{FromRequest, FromRequestParts, Path, Query, Request};
use axum::http::request::Parts;
use axum::http::{HeaderMap, header};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::orders::{OrderFields, OrderFilter, OrderId, OrderStatus};

use super::response::ApiError;

/// Wire format of `date`
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Largest total the `NUMERIC(14, 2)` column holds, exclusive
const MAX_TOTAL: i64 = 1_000_000_000_000;

// ============================================================================
// Validation Errors
// ============================================================================

/// Validation errors, each naming the offending field
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum OrderValidationError {
    #[error("Missing required field '{field}'")]
    Missing { field: &'static str },

    #[error("Field '{field}' must be {expected}")]
    InvalidType {
        field: &'static str,
        expected: &'static str,
    },

    #[error("Invalid value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

impl OrderValidationError {
    pub fn field(&self) -> &str {
        match self {
            Self::Missing { field } | Self::InvalidType { field, .. } => *field,
            Self::InvalidValue { field, .. } => field.as_str(),
        }
    }

    fn invalid_value(field: &str, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

// ============================================================================
// OrderRequest: HTTP Body
// ============================================================================

/// Order create/update body
///
/// Fields are kept as raw JSON so that a wrong type is reported against the
/// field that carries it. `null` counts as missing. Unknown keys (including
/// `id`) are ignored.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct OrderRequest {
    #[serde(default)]
    #[schema(value_type = String, example = "Grogu")]
    pub customer: Option<Value>,
    #[serde(default)]
    #[schema(value_type = f64, example = 100)]
    pub total: Option<Value>,
    #[serde(default)]
    #[schema(value_type = OrderStatus)]
    pub status: Option<Value>,
    #[serde(default)]
    #[schema(value_type = String, format = Date, example = "2022-06-16")]
    pub date: Option<Value>,
}

/// Validate an `OrderRequest` into `OrderFields`
///
/// Fields are checked in the order customer, total, status, date; the first
/// failure is returned.
pub fn validate_order_request(req: OrderRequest) -> Result<OrderFields, OrderValidationError> {
    let customer = match req.customer {
        None => return Err(OrderValidationError::Missing { field: "customer" }),
        Some(Value::String(s)) => s.trim().to_string(),
        Some(_) => {
            return Err(OrderValidationError::InvalidType {
                field: "customer",
                expected: "a string",
            });
        }
    };

    let total = match req.total {
        None => return Err(OrderValidationError::Missing { field: "total" }),
        Some(Value::Number(n)) => parse_total(&n.to_string())?,
        Some(_) => {
            return Err(OrderValidationError::InvalidType {
                field: "total",
                expected: "a number",
            });
        }
    };

    let status = match req.status {
        None => return Err(OrderValidationError::Missing { field: "status" }),
        Some(Value::String(s)) => parse_status("status", &s)?,
        Some(_) => {
            return Err(OrderValidationError::InvalidType {
                field: "status",
                expected: "a string",
            });
        }
    };

    let date = match req.date {
        None => return Err(OrderValidationError::Missing { field: "date" }),
        Some(Value::String(s)) => parse_date("date", &s)?,
        Some(_) => {
            return Err(OrderValidationError::InvalidType {
                field: "date",
                expected: "an ISO 8601 date string",
            });
        }
    };

    let fields = OrderFields {
        customer,
        total,
        status,
        date,
    };

    // Declarative rules on the typed record
    if let Err(errors) = fields.validate() {
        if let Some((field, field_errors)) = errors.field_errors().into_iter().next() {
            let reason = field_errors
                .first()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string())
                })
                .unwrap_or_else(|| "invalid".to_string());
            return Err(OrderValidationError::invalid_value(&field, reason));
        }
    }

    Ok(fields)
}

fn parse_total(raw: &str) -> Result<Decimal, OrderValidationError> {
    let total = Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .map_err(|_| OrderValidationError::invalid_value("total", "not a representable amount"))?
        .normalize();

    if total.is_sign_negative() && !total.is_zero() {
        return Err(OrderValidationError::invalid_value(
            "total",
            "must be non-negative",
        ));
    }
    if total.scale() > 2 {
        return Err(OrderValidationError::invalid_value(
            "total",
            "at most 2 decimal places",
        ));
    }
    if total >= Decimal::from(MAX_TOTAL) {
        return Err(OrderValidationError::invalid_value(
            "total",
            format!("must be less than {}", MAX_TOTAL),
        ));
    }
    // -0 normalizes to 0 but keeps its sign bit
    Ok(total.abs())
}

fn parse_status(field: &str, raw: &str) -> Result<OrderStatus, OrderValidationError> {
    OrderStatus::from_str(raw).map_err(|e| OrderValidationError::invalid_value(field, e.to_string()))
}

fn parse_date(field: &str, raw: &str) -> Result<NaiveDate, OrderValidationError> {
    // chrono alone would accept unpadded months and days
    let well_formed = raw.len() == 10
        && raw.bytes().enumerate().all(|(i, b)| match i {
            4 | 7 => b == b'-',
            _ => b.is_ascii_digit(),
        });

    well_formed
        .then(|| NaiveDate::parse_from_str(raw, DATE_FORMAT).ok())
        .flatten()
        .ok_or_else(|| {
            OrderValidationError::invalid_value(
                field,
                format!("'{}' is not an ISO 8601 date (YYYY-MM-DD)", raw),
            )
        })
}

// ============================================================================
// OrderBody / ValidatedOrder: Axum Framework Integration
// ============================================================================

/// `application/json` or any `application/*+json` media type
fn has_json_content_type(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
    else {
        return false;
    };

    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    essence == "application/json"
        || (essence.starts_with("application/") && essence.ends_with("+json"))
}

/// Order body with a JSON content type, not yet parsed
///
/// Lets a handler resolve the target order before the body is judged, so an
/// unknown id answers 404 even when the body is bad.
#[derive(Debug, Clone)]
pub struct OrderBody(Bytes);

impl OrderBody {
    /// Parse into an `OrderRequest`; the body must be a JSON object
    pub fn parse(&self) -> Result<OrderRequest, ApiError> {
        let value: Value = serde_json::from_slice(&self.0)
            .map_err(|e| ApiError::bad_request(format!("Invalid JSON: {}", e)))?;

        if !value.is_object() {
            return ApiError::bad_request("Order body must be a JSON object").into_err();
        }

        serde_json::from_value(value)
            .map_err(|e| ApiError::bad_request(format!("Invalid order body: {}", e)))
    }

    /// Parse and validate into `OrderFields`
    pub fn validate(&self) -> Result<OrderFields, ApiError> {
        let request = self.parse()?;
        validate_order_request(request).map_err(|e| {
            tracing::warn!(field = e.field(), "Order rejected: {}", e);
            ApiError::from(e)
        })
    }
}

impl<S> FromRequest<S> for OrderBody
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if !has_json_content_type(req.headers()) {
            return ApiError::unsupported_media_type("Content-Type must be application/json")
                .into_err();
        }

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| ApiError::bad_request(e.body_text()))?;
        Ok(Self(bytes))
    }
}

/// Validated order body extractor
///
/// Handlers taking this never see an invalid order.
#[derive(Debug)]
pub struct ValidatedOrder(pub OrderFields);

impl<S> FromRequest<S> for ValidatedOrder
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let body = OrderBody::from_request(req, state).await?;
        Ok(ValidatedOrder(body.validate()?))
    }
}

// ============================================================================
// OrderIdPath
// ============================================================================

/// `{id}` path segment parsed as an order id
#[derive(Debug, Clone, Copy)]
pub struct OrderIdPath(pub OrderId);

impl<S> FromRequestParts<S> for OrderIdPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::bad_request(e.body_text()))?;

        raw.parse::<OrderId>().map(OrderIdPath).map_err(|_| {
            ApiError::invalid_field("id", format!("Order id '{}' is not an integer", raw))
        })
    }
}

// ============================================================================
// OrderQueryParams
// ============================================================================

/// List/search filters; empty values are ignored
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct OrderQueryParams {
    /// Exact customer match
    pub customer: Option<String>,
    /// Exact status match
    pub status: Option<String>,
    /// Exact date match (YYYY-MM-DD)
    pub date: Option<String>,
}

impl OrderQueryParams {
    pub fn into_filter(self) -> Result<OrderFilter, OrderValidationError> {
        let non_empty = |v: Option<String>| v.filter(|s| !s.trim().is_empty());

        Ok(OrderFilter {
            customer: non_empty(self.customer),
            status: non_empty(self.status)
                .map(|s| parse_status("status", &s))
                .transpose()?,
            date: non_empty(self.date)
                .map(|s| parse_date("date", s.trim()))
                .transpose()?,
        })
    }
}

/// Query string parsed into an `OrderFilter`
///
/// Malformed query strings (e.g. a repeated key) are reported as JSON errors.
#[derive(Debug, Clone)]
pub struct OrderQuery(pub OrderFilter);

impl<S> FromRequestParts<S> for OrderQuery
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params): Query<OrderQueryParams> = Query::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::bad_request(e.body_text()))?;

        Ok(OrderQuery(params.into_filter()?))
    }
}
