//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on abstractions (traits) for
//! dependency inversion.

mod account_service;
mod order_service;
mod token_issuer;

pub use account_service::{AccountManager, AccountService};
pub use order_service::{OrderManager, OrderService};
pub use token_issuer::{Claims, TokenIssuer};
