//! Order domain entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Order domain entity.
///
/// An order belongs to exactly one user, recorded in `author_id` at
/// creation time and never reassigned. There are no state transitions:
/// an order exists until its owner deletes it.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Unique order identifier
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub id: Uuid,
    /// Owning user, set server-side at creation
    pub author_id: Uuid,
    /// Free-text product label
    #[schema(example = "Book")]
    pub product: String,
    /// Ordered quantity
    #[schema(example = 2)]
    pub amount: i32,
    /// Server-side creation timestamp
    pub creation_time: DateTime<Utc>,
}

impl Order {
    /// Check whether `user_id` is the recorded owner.
    ///
    /// Delete authorization compares against the stored foreign key, not
    /// against a loaded user object.
    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.author_id == user_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ownership_matches_author_id() {
        let owner = Uuid::new_v4();
        let order = Order {
            id: Uuid::new_v4(),
            author_id: owner,
            product: "Book".to_string(),
            amount: 2,
            creation_time: Utc::now(),
        };

        assert!(order.is_owned_by(owner));
        assert!(!order.is_owned_by(Uuid::new_v4()));
    }
}
