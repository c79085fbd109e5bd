//! Repository pattern implementations
//!
//! Data access objects for DynamoDB tables.

pub mod user_profile;

pub use user_profile::UserProfileRepository;
