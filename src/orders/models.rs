//! Order record types
//!
//! - `Order`: a stored order, identified by a store-assigned id
//! - `OrderFields`: the mutable part of an order (create / full update input)
//! - `OrderStatus`: order lifecycle status
//! - `OrderFilter`: exact-match search constraints

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

/// Store-assigned order identifier
pub type OrderId = i64;

// ============================================================================
// OrderStatus
// ============================================================================

/// Order status
///
/// Transitions are unrestricted; cancel always lands on `Cancelled`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum OrderStatus {
    Open,
    Closed,
    Cancelled,
    Refunded,
    Returned,
    Error,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 6] = [
        OrderStatus::Open,
        OrderStatus::Closed,
        OrderStatus::Cancelled,
        OrderStatus::Refunded,
        OrderStatus::Returned,
        OrderStatus::Error,
    ];

    /// Canonical text form, as stored in the `status` column
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::Closed => "Closed",
            Self::Cancelled => "Cancelled",
            Self::Refunded => "Refunded",
            Self::Returned => "Returned",
            Self::Error => "Error",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown status text
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown order status '{0}' (expected one of: Open, Closed, Cancelled, Refunded, Returned, Error)")]
pub struct UnknownStatus(pub String);

impl FromStr for OrderStatus {
    type Err = UnknownStatus;

    /// Case-insensitive; `Canceled` is accepted as an alias of `Cancelled`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        if normalized == "canceled" {
            return Ok(Self::Cancelled);
        }
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(&normalized))
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}

// ============================================================================
// Order / OrderFields
// ============================================================================

/// Mutable order fields, already type-checked
///
/// `validate()` applies the remaining field rules (customer length).
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct OrderFields {
    #[validate(
        length(min = 1, max = 64, message = "must be 1-64 characters"),
        custom(function = "OrderFields::validate_customer_chars")
    )]
    pub customer: String,
    pub total: Decimal,
    pub status: OrderStatus,
    pub date: NaiveDate,
}

impl OrderFields {
    /// PostgreSQL text columns reject NUL, so control characters are refused
    /// up front for every backend.
    fn validate_customer_chars(customer: &str) -> Result<(), ValidationError> {
        if customer.chars().any(char::is_control) {
            return Err(ValidationError::new("control_character")
                .with_message(Cow::Borrowed("must not contain control characters")));
        }
        Ok(())
    }
}

/// Order record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Order {
    #[schema(example = 1)]
    pub id: OrderId,
    #[schema(example = "Grogu")]
    pub customer: String,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 100.0)]
    pub total: Decimal,
    pub status: OrderStatus,
    #[schema(value_type = String, format = Date, example = "2022-06-16")]
    pub date: NaiveDate,
}

impl Order {
    pub fn from_fields(id: OrderId, fields: OrderFields) -> Self {
        Self {
            id,
            customer: fields.customer,
            total: fields.total,
            status: fields.status,
            date: fields.date,
        }
    }
}

// ============================================================================
// OrderFilter
// ============================================================================

/// Exact-match search constraints; `None` means unconstrained
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderFilter {
    pub customer: Option<String>,
    pub status: Option<OrderStatus>,
    pub date: Option<NaiveDate>,
}

impl OrderFilter {
    pub fn is_empty(&self) -> bool {
        self.customer.is_none() && self.status.is_none() && self.date.is_none()
    }

    pub fn matches(&self, order: &Order) -> bool {
        self.customer.as_ref().is_none_or(|c| *c == order.customer)
            && self.status.is_none_or(|s| s == order.status)
            && self.date.is_none_or(|d| d == order.date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(status: OrderStatus) -> Order {
        Order {
            id: 7,
            customer: "Grogu".to_string(),
            total: Decimal::new(10050, 2),
            status,
            date: NaiveDate::from_ymd_opt(2022, 6, 16).unwrap(),
        }
    }

    #[test]
    fn test_status_round_trips_through_text() {
        for status in OrderStatus::ALL {
            assert_eq!(status.as_str().parse::<OrderStatus>(), Ok(status));
        }
    }

    #[test]
    fn test_status_parse_is_case_insensitive() {
        assert_eq!("open".parse::<OrderStatus>(), Ok(OrderStatus::Open));
        assert_eq!("REFUNDED".parse::<OrderStatus>(), Ok(OrderStatus::Refunded));
        assert_eq!("Canceled".parse::<OrderStatus>(), Ok(OrderStatus::Cancelled));
    }

    #[test]
    fn test_status_parse_rejects_unknown() {
        let err = "Shipped".parse::<OrderStatus>().unwrap_err();
        assert_eq!(err, UnknownStatus("Shipped".to_string()));
        assert!(err.to_string().contains("Shipped"));
    }

    #[test]
    fn test_order_serializes_wire_shape() {
        let json = serde_json::to_value(sample(OrderStatus::Open)).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["customer"], "Grogu");
        assert_eq!(json["total"].as_f64(), Some(100.5));
        assert_eq!(json["status"], "Open");
        assert_eq!(json["date"], "2022-06-16");
    }

    #[test]
    fn test_customer_rejects_control_characters() {
        let mut fields = OrderFields {
            customer: "Gro\0gu".to_string(),
            total: Decimal::new(100, 0),
            status: OrderStatus::Open,
            date: NaiveDate::from_ymd_opt(2022, 6, 16).unwrap(),
        };
        let errors = fields.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("customer"));

        fields.customer = "Grogu".to_string();
        assert!(fields.validate().is_ok());
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let filter = OrderFilter::default();
        assert!(filter.is_empty());
        assert!(filter.matches(&sample(OrderStatus::Closed)));
    }

    #[test]
    fn test_filter_requires_every_constraint() {
        let filter = OrderFilter {
            customer: Some("Grogu".to_string()),
            status: Some(OrderStatus::Open),
            date: None,
        };
        assert!(filter.matches(&sample(OrderStatus::Open)));
        assert!(!filter.matches(&sample(OrderStatus::Closed)));

        let other_customer = OrderFilter {
            customer: Some("Din".to_string()),
            ..Default::default()
        };
        assert!(!other_customer.matches(&sample(OrderStatus::Open)));
    }
}
