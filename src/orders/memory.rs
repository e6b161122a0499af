//! In-memory order store
//!
//! Backs the API when no PostgreSQL URL is configured, and in tests.

use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;

use super::models::{Order, OrderFields, OrderFilter, OrderId, OrderStatus};
use super::{OrderStore, StoreError};

/// DashMap-backed order store with a monotonically increasing id sequence
pub struct MemoryOrderStore {
    orders: DashMap<OrderId, Order>,
    next_id: AtomicI64,
}

impl MemoryOrderStore {
    pub fn new() -> Self {
        Self {
            orders: DashMap::new(),
            next_id: AtomicI64::new(1),
        }
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}

impl Default for MemoryOrderStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OrderStore for MemoryOrderStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn create(&self, fields: &OrderFields) -> Result<Order, StoreError> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let order = Order::from_fields(id, fields.clone());
        self.orders.insert(id, order.clone());
        Ok(order)
    }

    async fn get(&self, id: OrderId) -> Result<Option<Order>, StoreError> {
        Ok(self.orders.get(&id).map(|entry| entry.value().clone()))
    }

    async fn update(
        &self,
        id: OrderId,
        fields: &OrderFields,
    ) -> Result<Option<Order>, StoreError> {
        Ok(self.orders.get_mut(&id).map(|mut entry| {
            *entry = Order::from_fields(id, fields.clone());
            entry.value().clone()
        }))
    }

    async fn update_status(
        &self,
        id: OrderId,
        status: OrderStatus,
    ) -> Result<Option<Order>, StoreError> {
        Ok(self.orders.get_mut(&id).map(|mut entry| {
            entry.status = status;
            entry.value().clone()
        }))
    }

    async fn delete(&self, id: OrderId) -> Result<bool, StoreError> {
        Ok(self.orders.remove(&id).is_some())
    }

    async fn list(&self, filter: &OrderFilter) -> Result<Vec<Order>, StoreError> {
        let mut orders: Vec<Order> = self
            .orders
            .iter()
            .filter(|entry| filter.matches(entry.value()))
            .map(|entry| entry.value().clone())
            .collect();
        orders.sort_by_key(|order| order.id);
        Ok(orders)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn fields(customer: &str, status: OrderStatus, day: u32) -> OrderFields {
        OrderFields {
            customer: customer.to_string(),
            total: Decimal::new(100, 0),
            status,
            date: NaiveDate::from_ymd_opt(2022, 6, day).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_create_assigns_increasing_ids() {
        let store = MemoryOrderStore::new();
        let a = store.create(&fields("Grogu", OrderStatus::Open, 16)).await.unwrap();
        let b = store.create(&fields("Din", OrderStatus::Open, 16)).await.unwrap();

        assert!(b.id > a.id);
        assert_eq!(store.len(), 2);
        assert_eq!(store.get(a.id).await.unwrap(), Some(a));
    }

    #[tokio::test]
    async fn test_update_keeps_id_and_replaces_fields() {
        let store = MemoryOrderStore::new();
        let created = store.create(&fields("Grogu", OrderStatus::Open, 16)).await.unwrap();

        let replacement = fields("Din", OrderStatus::Closed, 20);
        let updated = store.update(created.id, &replacement).await.unwrap().unwrap();

        assert_eq!(updated, Order::from_fields(created.id, replacement));
        assert_eq!(store.get(created.id).await.unwrap(), Some(updated));
    }

    #[tokio::test]
    async fn test_update_unknown_id_returns_none() {
        let store = MemoryOrderStore::new();
        let result = store.update(42, &fields("Grogu", OrderStatus::Open, 16)).await;
        assert_eq!(result.unwrap(), None);
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_update_status_only_touches_status() {
        let store = MemoryOrderStore::new();
        let created = store.create(&fields("Grogu", OrderStatus::Refunded, 16)).await.unwrap();

        let cancelled = store
            .update_status(created.id, OrderStatus::Cancelled)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(cancelled.status, OrderStatus::Cancelled);
        assert_eq!(cancelled.customer, created.customer);
        assert_eq!(cancelled.total, created.total);
        assert_eq!(cancelled.date, created.date);
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let store = MemoryOrderStore::new();
        let created = store.create(&fields("Grogu", OrderStatus::Open, 16)).await.unwrap();

        assert!(store.delete(created.id).await.unwrap());
        assert!(!store.delete(created.id).await.unwrap());
        assert_eq!(store.get(created.id).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_list_filters_and_orders_by_id() {
        let store = MemoryOrderStore::new();
        store.create(&fields("Grogu", OrderStatus::Open, 16)).await.unwrap();
        store.create(&fields("Din", OrderStatus::Closed, 16)).await.unwrap();
        store.create(&fields("Grogu", OrderStatus::Closed, 17)).await.unwrap();

        let all = store.list(&OrderFilter::default()).await.unwrap();
        assert_eq!(all.len(), 3);
        assert!(all.windows(2).all(|w| w[0].id < w[1].id));

        let closed = store
            .list(&OrderFilter {
                status: Some(OrderStatus::Closed),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(closed.len(), 2);
        assert!(closed.iter().all(|o| o.status == OrderStatus::Closed));

        let grogu_closed = store
            .list(&OrderFilter {
                customer: Some("Grogu".to_string()),
                status: Some(OrderStatus::Closed),
                date: None,
            })
            .await
            .unwrap();
        assert_eq!(grogu_closed.len(), 1);
        assert_eq!(grogu_closed[0].date, NaiveDate::from_ymd_opt(2022, 6, 17).unwrap());
    }
}
