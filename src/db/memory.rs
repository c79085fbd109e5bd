//! In-memory user store
//!
//! Keeps profiles in a `HashMap` behind a `tokio::sync::RwLock`. Used for
//! local runs without DynamoDB (`STORE_BACKEND=memory`) and in tests.
//! Nothing is persisted past the lifetime of the process.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::db::models::UserProfile;
use crate::db::store::{TableStatus, UserStore};
use crate::error::StoreError;

#[derive(Debug, Clone)]
pub struct InMemoryUserStore {
    table_name: String,
    table_exists: Arc<AtomicBool>,
    users: Arc<RwLock<HashMap<String, UserProfile>>>,
}

impl InMemoryUserStore {
    /// Creates an empty store whose table does not exist yet
    pub fn new(table_name: impl Into<String>) -> Self {
        Self {
            table_name: table_name.into(),
            table_exists: Arc::new(AtomicBool::new(false)),
            users: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    fn require_table(&self) -> Result<(), StoreError> {
        if self.table_exists.load(Ordering::Acquire) {
            Ok(())
        } else {
            Err(StoreError::DynamoDb(format!(
                "Requested resource not found: table {} does not exist",
                self.table_name
            )))
        }
    }

    /// Number of stored profiles
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    fn table_name(&self) -> &str {
        &self.table_name
    }

    async fn ensure_table(&self) -> Result<TableStatus, StoreError> {
        // compare_exchange lets exactly one concurrent caller observe Created
        match self
            .table_exists
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
        {
            Ok(_) => Ok(TableStatus::Created),
            Err(_) => Ok(TableStatus::AlreadyExists),
        }
    }

    async fn put_user(&self, user: &UserProfile) -> Result<(), StoreError> {
        self.require_table()?;
        let mut users = self.users.write().await;
        users.insert(user.user_id.clone(), user.clone());
        Ok(())
    }

    async fn get_user(&self, user_id: &str) -> Result<Option<UserProfile>, StoreError> {
        self.require_table()?;
        let users = self.users.read().await;
        Ok(users.get(user_id).cloned())
    }

    async fn delete_user(&self, user_id: &str) -> Result<(), StoreError> {
        self.require_table()?;
        let mut users = self.users.write().await;
        users.remove(user_id);
        Ok(())
    }
}
