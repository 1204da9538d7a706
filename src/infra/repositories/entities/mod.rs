//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models.

pub mod order;
pub mod user;

// Re-exports for public API convenience
#[allow(unused_imports)]
pub use order::{ActiveModel as OrderActiveModel, Entity as OrderEntity, Model as OrderModel};
#[allow(unused_imports)]
pub use user::{ActiveModel as UserActiveModel, Entity as UserEntity, Model as UserModel};
