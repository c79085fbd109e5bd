//! Record lifecycle handler
//!
//! On every invocation: ensure the users table exists, put a profile, read it
//! back, delete it, then echo the input uppercased.

use lambda_runtime::{Error, LambdaEvent};
use std::sync::Arc;

use crate::config::{create_dynamodb_client, Settings, StoreBackend};
use crate::db::{
    DynamoDbClient, InMemoryUserStore, TableStatus, UserProfile, UserProfileRepository, UserStore,
};
use crate::error::StoreError;

/// Profile written and removed on every invocation
pub fn demo_profile() -> UserProfile {
    UserProfile::new("user123", "test@example.com", 30)
}

/// Runs the ensure-table, put, get, delete sequence against a [`UserStore`]
#[derive(Clone)]
pub struct RecordLifecycleHandler {
    store: Arc<dyn UserStore>,
}

impl RecordLifecycleHandler {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }

    /// Build the handler with the store selected by `settings.store_backend`.
    ///
    /// Called once at cold start; the resulting handler is shared by every
    /// invocation of the process.
    pub async fn from_settings(settings: Arc<Settings>) -> Self {
        let store: Arc<dyn UserStore> = match settings.store_backend {
            StoreBackend::DynamoDb => {
                let sdk_client = create_dynamodb_client(&settings).await;
                let client = Arc::new(DynamoDbClient::new(settings.clone(), sdk_client));
                Arc::new(UserProfileRepository::new(client))
            }
            StoreBackend::Memory => {
                Arc::new(InMemoryUserStore::new(settings.dynamodb_users_table.clone()))
            }
        };

        tracing::info!(
            backend = %settings.store_backend,
            table = %store.table_name(),
            "Store initialized"
        );

        Self::new(store)
    }

    pub fn store(&self) -> &dyn UserStore {
        self.store.as_ref()
    }

    /// Run the record lifecycle and return `input` uppercased.
    ///
    /// The first failing step aborts the sequence; a profile that was put
    /// before a later failure is left in the table.
    pub async fn handle(&self, input: &str) -> Result<String, StoreError> {
        let table = self.store.table_name();

        match self.store.ensure_table().await? {
            TableStatus::Created => tracing::info!(table = %table, "Table creation initiated"),
            TableStatus::AlreadyExists => tracing::info!(table = %table, "Table already exists"),
        }

        let profile = demo_profile();
        self.store.put_user(&profile).await?;
        tracing::info!(user_id = %profile.user_id, "User created");

        match self.store.get_user(&profile.user_id).await? {
            Some(user) => tracing::info!(
                user_id = %user.user_id,
                email = %user.email,
                age = user.age,
                "Read user from table"
            ),
            // Possible right after a put under eventual consistency
            None => tracing::warn!(user_id = %profile.user_id, "User not found after put"),
        }

        self.store.delete_user(&profile.user_id).await?;
        tracing::info!(user_id = %profile.user_id, "User deleted");

        Ok(input.to_uppercase())
    }
}

/// Lambda entry point: the payload is a JSON string, so is the response
pub async fn function_handler(
    handler: &RecordLifecycleHandler,
    event: LambdaEvent<String>,
) -> Result<String, Error> {
    tracing::debug!(request_id = %event.context.request_id, "Invocation started");

    let output = handler.handle(&event.payload).await.map_err(|e| {
        tracing::error!(error = %e, "Invocation failed");
        e
    })?;

    tracing::info!("Done");
    Ok(output)
}
