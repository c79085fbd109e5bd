//! User profile repository
//!
//! Data access layer for user profile operations.

use async_trait::async_trait;
use std::sync::Arc;

use crate::db::models::{user_key, UserProfile};
use crate::db::store::{TableStatus, UserStore};
use crate::db::DynamoDbClient;
use crate::error::StoreError;

/// Repository for user profile operations
#[derive(Clone)]
pub struct UserProfileRepository {
    client: Arc<DynamoDbClient>,
}

impl UserProfileRepository {
    /// Create a new user profile repository
    pub fn new(client: Arc<DynamoDbClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl UserStore for UserProfileRepository {
    fn table_name(&self) -> &str {
        self.client.users_table()
    }

    async fn ensure_table(&self) -> Result<TableStatus, StoreError> {
        self.client.ensure_users_table().await
    }

    async fn put_user(&self, user: &UserProfile) -> Result<(), StoreError> {
        self.client
            .client()
            .put_item()
            .table_name(self.client.users_table())
            .set_item(Some(user.to_dynamodb()))
            .send()
            .await
            .map_err(|e| StoreError::dynamodb("PutItem", e))?;

        tracing::debug!(user_id = %user.user_id, "Put user profile");

        Ok(())
    }

    async fn get_user(&self, user_id: &str) -> Result<Option<UserProfile>, StoreError> {
        let result = self
            .client
            .client()
            .get_item()
            .table_name(self.client.users_table())
            .set_key(Some(user_key(user_id)))
            .send()
            .await
            .map_err(|e| StoreError::dynamodb("GetItem", e))?;

        match result.item {
            Some(item) if !item.is_empty() => Ok(Some(UserProfile::from_dynamodb(&item)?)),
            _ => Ok(None),
        }
    }

    async fn delete_user(&self, user_id: &str) -> Result<(), StoreError> {
        self.client
            .client()
            .delete_item()
            .table_name(self.client.users_table())
            .set_key(Some(user_key(user_id)))
            .send()
            .await
            .map_err(|e| StoreError::dynamodb("DeleteItem", e))?;

        tracing::debug!(user_id = %user_id, "Deleted user profile");

        Ok(())
    }
}
