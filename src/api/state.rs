//! Application state - Dependency injection container.
//!
//! Provides centralized access to all application services.

use std::sync::Arc;

use crate::config::Config;
use crate::infra::{Database, OrderRepository, OrderStore, UserRepository, UserStore};
use crate::services::{
    AccountManager, AccountService, OrderManager, OrderService, TokenIssuer,
};

/// Application state containing all services (DI container).
#[derive(Clone)]
pub struct AppState {
    /// Account service (registration, login, lookup)
    pub account_service: Arc<dyn AccountService>,
    /// Order service
    pub order_service: Arc<dyn OrderService>,
    /// Token issuer, shared by handlers and the auth middleware
    pub tokens: Arc<TokenIssuer>,
}

impl AppState {
    /// Create application state from a database connection and config.
    ///
    /// Wires the concrete repositories and services; this is the
    /// composition root used by the serve command.
    pub fn from_config(database: &Database, config: &Config) -> Self {
        let users: Arc<dyn UserRepository> = Arc::new(UserStore::new(database.get_connection()));
        let orders: Arc<dyn OrderRepository> = Arc::new(OrderStore::new(database.get_connection()));

        Self {
            account_service: Arc::new(AccountManager::new(users)),
            order_service: Arc::new(OrderManager::new(orders)),
            tokens: Arc::new(TokenIssuer::new(&config.jwt)),
        }
    }

    /// Create new application state with manually injected services.
    ///
    /// Used by tests to substitute alternative service implementations.
    pub fn new(
        account_service: Arc<dyn AccountService>,
        order_service: Arc<dyn OrderService>,
        tokens: Arc<TokenIssuer>,
    ) -> Self {
        Self {
            account_service,
            order_service,
            tokens,
        }
    }
}
