//! Order repository implementation.

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use uuid::Uuid;

use super::entities::order::{ActiveModel, Entity as OrderEntity};
use crate::domain::Order;
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Order repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Find order by ID
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Order>>;

    /// List all orders system-wide
    async fn list(&self) -> AppResult<Vec<Order>>;

    /// Create a new order owned by `author_id`; id and creation time are
    /// generated server-side
    async fn create(&self, product: String, amount: i32, author_id: Uuid) -> AppResult<Order>;

    /// Remove the order row.
    ///
    /// Reports NotFound when the row was already gone, so a delete that
    /// loses a race against a concurrent delete of the same id surfaces
    /// as NotFound rather than silent success.
    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

/// Concrete implementation of OrderRepository
pub struct OrderStore {
    db: DatabaseConnection,
}

impl OrderStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl OrderRepository for OrderStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Order>> {
        let result = OrderEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Order::from))
    }

    async fn list(&self) -> AppResult<Vec<Order>> {
        let models = OrderEntity::find()
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Order::from).collect())
    }

    async fn create(&self, product: String, amount: i32, author_id: Uuid) -> AppResult<Order> {
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            author_id: Set(author_id),
            product: Set(product),
            amount: Set(amount),
            creation_time: Set(chrono::Utc::now()),
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        Ok(Order::from(model))
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = OrderEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }
}
