//! HTTP request handlers.

pub mod account_handler;
pub mod order_handler;

pub use account_handler::account_routes;
pub use order_handler::order_routes;
