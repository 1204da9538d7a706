//! Account service - Registration, login, and user lookup.
//!
//! Maps credentials to a stable user identity. Token minting is the
//! token issuer's job; handlers compose the two.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{Password, User};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UserRepository;

/// Account service trait for dependency injection.
#[async_trait]
pub trait AccountService: Send + Sync {
    /// Register a new user and return the stored account
    async fn register(&self, email: String, password: String) -> AppResult<User>;

    /// Verify credentials and return the resolved account
    async fn login(&self, email: String, password: String) -> AppResult<User>;

    /// Look up the displayed username for a user id
    async fn get_username(&self, user_id: Uuid) -> AppResult<String>;
}

/// Concrete implementation of AccountService.
pub struct AccountManager {
    users: Arc<dyn UserRepository>,
}

impl AccountManager {
    /// Create new account service instance
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl AccountService for AccountManager {
    async fn register(&self, email: String, password: String) -> AppResult<User> {
        // Email format is validated by the handler's ValidatedJson extractor
        if self.users.find_by_email(&email).await?.is_some() {
            return Err(AppError::validation("Email is already taken"));
        }

        let password_hash = Password::new(&password)?.into_string();
        self.users.create(email, password_hash).await
    }

    async fn login(&self, email: String, password: String) -> AppResult<User> {
        let user_result = self.users.find_by_email(&email).await?;

        // SECURITY: Perform password verification even if user doesn't exist
        // to prevent timing attacks that could enumerate valid emails.
        // We use a dummy hash that will always fail verification.
        let dummy_hash =
            "$argon2id$v=19$m=19456,t=2,p=1$dummysalt123456$dummyhash1234567890123456789012";

        let (password_hash, user_exists) = match &user_result {
            Some(user) => (user.password_hash.as_str(), true),
            None => (dummy_hash, false),
        };

        let password_valid = Password::from_hash(password_hash.to_string()).verify(&password);

        // Only succeed if both user exists AND password is valid
        if !user_exists || !password_valid {
            return Err(AppError::InvalidCredentials);
        }

        // Safe to unwrap since we verified user_exists is true
        let user = user_result.unwrap();

        // Locked accounts fail with the same generic error as a bad password
        if user.is_locked_out() {
            return Err(AppError::InvalidCredentials);
        }

        Ok(user)
    }

    async fn get_username(&self, user_id: Uuid) -> AppResult<String> {
        let user = self.users.find_by_id(user_id).await?.ok_or_not_found()?;
        Ok(user.username().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::MockUserRepository;
    use chrono::{Duration, Utc};

    fn stored_user(email: &str, password: &str) -> User {
        User {
            id: Uuid::new_v4(),
            email: email.to_string(),
            password_hash: Password::new(password).unwrap().into_string(),
            lockout_end: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_register_rejects_taken_email() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .returning(|email| Ok(Some(stored_user(email, "Secret123!"))));

        let service = AccountManager::new(Arc::new(repo));
        let result = service
            .register("alice@x.com".to_string(), "Secret123!".to_string())
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_register_stores_hashed_credential() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email().returning(|_| Ok(None));
        repo.expect_create()
            .withf(|_, hash| hash.starts_with("$argon2") && !hash.contains("Secret123!"))
            .returning(|email, hash| {
                let mut user = stored_user(&email, "placeholder");
                user.password_hash = hash;
                Ok(user)
            });

        let service = AccountManager::new(Arc::new(repo));
        let user = service
            .register("alice@x.com".to_string(), "Secret123!".to_string())
            .await
            .unwrap();

        assert_eq!(user.email, "alice@x.com");
    }

    #[tokio::test]
    async fn test_register_rejects_short_password() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email().returning(|_| Ok(None));

        let service = AccountManager::new(Arc::new(repo));
        let result = service
            .register("alice@x.com".to_string(), "short".to_string())
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_login_success_returns_user() {
        let expected = stored_user("alice@x.com", "Secret123!");
        let expected_id = expected.id;

        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .returning(move |_| Ok(Some(expected.clone())));

        let service = AccountManager::new(Arc::new(repo));
        let user = service
            .login("alice@x.com".to_string(), "Secret123!".to_string())
            .await
            .unwrap();

        assert_eq!(user.id, expected_id);
    }

    #[tokio::test]
    async fn test_login_wrong_password_fails() {
        let stored = stored_user("alice@x.com", "Secret123!");

        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .returning(move |_| Ok(Some(stored.clone())));

        let service = AccountManager::new(Arc::new(repo));
        let result = service
            .login("alice@x.com".to_string(), "WrongPassword!".to_string())
            .await;

        assert!(matches!(result, Err(AppError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_login_unknown_email_fails_with_same_error() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email().returning(|_| Ok(None));

        let service = AccountManager::new(Arc::new(repo));
        let result = service
            .login("nobody@x.com".to_string(), "Secret123!".to_string())
            .await;

        assert!(matches!(result, Err(AppError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_login_locked_account_fails() {
        let mut stored = stored_user("alice@x.com", "Secret123!");
        stored.lockout_end = Some(Utc::now() + Duration::hours(1));

        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .returning(move |_| Ok(Some(stored.clone())));

        let service = AccountManager::new(Arc::new(repo));
        let result = service
            .login("alice@x.com".to_string(), "Secret123!".to_string())
            .await;

        assert!(matches!(result, Err(AppError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_get_username_returns_email() {
        let stored = stored_user("alice@x.com", "Secret123!");
        let id = stored.id;

        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .returning(move |_| Ok(Some(stored.clone())));

        let service = AccountManager::new(Arc::new(repo));
        assert_eq!(service.get_username(id).await.unwrap(), "alice@x.com");
    }

    #[tokio::test]
    async fn test_get_username_not_found() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));

        let service = AccountManager::new(Arc::new(repo));
        let result = service.get_username(Uuid::new_v4()).await;

        assert!(matches!(result, Err(AppError::NotFound)));
    }
}
