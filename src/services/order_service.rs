//! Order service - Owner-scoped order operations.
//!
//! Every mutating call receives the resolved caller identity as an
//! explicit parameter; nothing here reads ambient request state.
//!
//! Reads are deliberately unscoped: any authenticated caller may list or
//! fetch any order. Only deletion checks ownership, by comparing the
//! caller against the stored author id.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::Order;
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::OrderRepository;

/// Order service trait for dependency injection.
#[async_trait]
pub trait OrderService: Send + Sync {
    /// List all orders system-wide
    async fn list_orders(&self) -> AppResult<Vec<Order>>;

    /// Get one order by id
    async fn get_order(&self, id: Uuid) -> AppResult<Order>;

    /// Create an order owned by `author`
    async fn create_order(&self, product: String, amount: i32, author: Uuid) -> AppResult<Order>;

    /// Delete an order, permitted only to its owner; returns the removed
    /// record
    async fn delete_order(&self, id: Uuid, caller: Uuid) -> AppResult<Order>;
}

/// Concrete implementation of OrderService.
pub struct OrderManager {
    orders: Arc<dyn OrderRepository>,
}

impl OrderManager {
    /// Create new order service instance
    pub fn new(orders: Arc<dyn OrderRepository>) -> Self {
        Self { orders }
    }
}

#[async_trait]
impl OrderService for OrderManager {
    async fn list_orders(&self) -> AppResult<Vec<Order>> {
        self.orders.list().await
    }

    async fn get_order(&self, id: Uuid) -> AppResult<Order> {
        self.orders.find_by_id(id).await?.ok_or_not_found()
    }

    async fn create_order(&self, product: String, amount: i32, author: Uuid) -> AppResult<Order> {
        // The author is whoever the token resolved to; client-supplied
        // owner or timestamp fields never reach this point.
        self.orders.create(product, amount, author).await
    }

    async fn delete_order(&self, id: Uuid, caller: Uuid) -> AppResult<Order> {
        let order = self.orders.find_by_id(id).await?.ok_or_not_found()?;

        if !order.is_owned_by(caller) {
            return Err(AppError::Unauthorized);
        }

        // The row may vanish between the lookup and the delete; the
        // repository reports that as NotFound, which is exactly what a
        // caller racing another delete should observe.
        self.orders.delete(id).await?;
        Ok(order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::MockOrderRepository;
    use chrono::Utc;
    use mockall::predicate::eq;

    fn stored_order(id: Uuid, author_id: Uuid) -> Order {
        Order {
            id,
            author_id,
            product: "Book".to_string(),
            amount: 2,
            creation_time: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_create_order_sets_author_to_caller() {
        let caller = Uuid::new_v4();

        let mut repo = MockOrderRepository::new();
        repo.expect_create()
            .withf(move |_, _, author| *author == caller)
            .returning(|product, amount, author| {
                Ok(Order {
                    id: Uuid::new_v4(),
                    author_id: author,
                    product,
                    amount,
                    creation_time: Utc::now(),
                })
            });

        let service = OrderManager::new(Arc::new(repo));
        let order = service
            .create_order("Book".to_string(), 2, caller)
            .await
            .unwrap();

        assert_eq!(order.author_id, caller);
        assert_eq!(order.product, "Book");
        assert_eq!(order.amount, 2);
    }

    #[tokio::test]
    async fn test_list_orders_returns_everything() {
        let mut repo = MockOrderRepository::new();
        repo.expect_list().returning(|| {
            Ok(vec![
                stored_order(Uuid::new_v4(), Uuid::new_v4()),
                stored_order(Uuid::new_v4(), Uuid::new_v4()),
            ])
        });

        let service = OrderManager::new(Arc::new(repo));
        assert_eq!(service.list_orders().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_get_order_not_found() {
        let mut repo = MockOrderRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));

        let service = OrderManager::new(Arc::new(repo));
        let result = service.get_order(Uuid::new_v4()).await;

        assert!(matches!(result, Err(AppError::NotFound)));
    }

    #[tokio::test]
    async fn test_delete_order_by_owner_returns_removed_record() {
        let order_id = Uuid::new_v4();
        let owner = Uuid::new_v4();

        let mut repo = MockOrderRepository::new();
        repo.expect_find_by_id()
            .with(eq(order_id))
            .returning(move |id| Ok(Some(stored_order(id, owner))));
        repo.expect_delete()
            .with(eq(order_id))
            .times(1)
            .returning(|_| Ok(()));

        let service = OrderManager::new(Arc::new(repo));
        let removed = service.delete_order(order_id, owner).await.unwrap();

        assert_eq!(removed.id, order_id);
        assert_eq!(removed.author_id, owner);
    }

    #[tokio::test]
    async fn test_delete_order_by_non_owner_is_unauthorized() {
        let order_id = Uuid::new_v4();
        let owner = Uuid::new_v4();

        let mut repo = MockOrderRepository::new();
        repo.expect_find_by_id()
            .returning(move |id| Ok(Some(stored_order(id, owner))));
        // No expect_delete: the row must be left intact
        repo.expect_delete().times(0);

        let service = OrderManager::new(Arc::new(repo));
        let result = service.delete_order(order_id, Uuid::new_v4()).await;

        assert!(matches!(result, Err(AppError::Unauthorized)));
    }

    #[tokio::test]
    async fn test_delete_missing_order_is_not_found() {
        let mut repo = MockOrderRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));

        let service = OrderManager::new(Arc::new(repo));
        let result = service.delete_order(Uuid::new_v4(), Uuid::new_v4()).await;

        assert!(matches!(result, Err(AppError::NotFound)));
    }

    #[tokio::test]
    async fn test_delete_losing_a_race_surfaces_not_found() {
        let order_id = Uuid::new_v4();
        let owner = Uuid::new_v4();

        let mut repo = MockOrderRepository::new();
        repo.expect_find_by_id()
            .returning(move |id| Ok(Some(stored_order(id, owner))));
        // A concurrent delete removed the row after the lookup
        repo.expect_delete().returning(|_| Err(AppError::NotFound));

        let service = OrderManager::new(Arc::new(repo));
        let result = service.delete_order(order_id, owner).await;

        assert!(matches!(result, Err(AppError::NotFound)));
    }
}
