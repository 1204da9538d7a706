//! User domain entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User domain entity.
///
/// The email doubles as the login name and the displayed username.
/// Users are never deleted; an account can only become unusable through
/// a lockout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// End of an administrative lockout (None = not locked)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lockout_end: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// The displayed username. Held in the same field as the login name.
    pub fn username(&self) -> &str {
        &self.email
    }

    /// Check whether the account is currently locked out.
    pub fn is_locked_out(&self) -> bool {
        self.lockout_end.map_or(false, |end| end > Utc::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn user(lockout_end: Option<DateTime<Utc>>) -> User {
        User {
            id: Uuid::new_v4(),
            email: "test@example.com".to_string(),
            password_hash: "hashed".to_string(),
            lockout_end,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_lockout_in_future_locks_account() {
        assert!(user(Some(Utc::now() + Duration::hours(1))).is_locked_out());
    }

    #[test]
    fn test_expired_or_absent_lockout_does_not_lock() {
        assert!(!user(Some(Utc::now() - Duration::hours(1))).is_locked_out());
        assert!(!user(None).is_locked_out());
    }

    #[test]
    fn test_username_is_the_email() {
        assert_eq!(user(None).username(), "test@example.com");
    }
}
