//! Database module
//!
//! Contains the DynamoDB client, the store abstraction, and its
//! DynamoDB and in-memory implementations.

pub mod dynamodb;
pub mod memory;
pub mod models;
pub mod repositories;
pub mod store;

#[cfg(test)]
pub(crate) mod test_support;

pub use dynamodb::DynamoDbClient;
pub use memory::InMemoryUserStore;
pub use models::UserProfile;
pub use repositories::UserProfileRepository;
pub use store::{TableStatus, UserStore};
