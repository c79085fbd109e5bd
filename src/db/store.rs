//! Store abstraction
//!
//! Every step of the record lifecycle goes through [`UserStore`], so the
//! handler runs unchanged against DynamoDB or the in-memory store.

use async_trait::async_trait;
use std::fmt;

use crate::db::models::UserProfile;
use crate::error::StoreError;

/// Outcome of an idempotent create-table call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableStatus {
    /// This call created the table
    Created,
    /// The table was already there (possibly created by a concurrent invocation)
    AlreadyExists,
}

impl fmt::Display for TableStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableStatus::Created => write!(f, "created"),
            TableStatus::AlreadyExists => write!(f, "already_exists"),
        }
    }
}

/// Key-value store holding user profiles
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Name of the backing table
    fn table_name(&self) -> &str;

    /// Create the table if it does not exist yet.
    ///
    /// "Already exists" is success; every other failure is returned unchanged.
    async fn ensure_table(&self) -> Result<TableStatus, StoreError>;

    /// Unconditionally write (overwrite) a profile
    async fn put_user(&self, user: &UserProfile) -> Result<(), StoreError>;

    /// Point lookup by `UserId`; `Ok(None)` when nothing matches
    async fn get_user(&self, user_id: &str) -> Result<Option<UserProfile>, StoreError>;

    /// Unconditional delete; deleting an absent key succeeds
    async fn delete_user(&self, user_id: &str) -> Result<(), StoreError>;
}
