//! DynamoDB client wrapper
//!
//! This module provides a wrapper around the AWS DynamoDB SDK client
//! holding the table settings, plus idempotent table provisioning.

use aws_sdk_dynamodb::types::{
    AttributeDefinition, BillingMode, KeySchemaElement, KeyType, ScalarAttributeType,
    TableStatus as SdkTableStatus,
};
use aws_sdk_dynamodb::Client as DynamoDbSdkClient;
use std::sync::Arc;
use std::time::Duration;

use crate::config::Settings;
use crate::db::models::USER_ID_ATTR;
use crate::db::store::TableStatus;
use crate::error::StoreError;

/// Interval between DescribeTable calls while waiting for ACTIVE
const TABLE_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// DynamoDB client wrapper for database operations.
///
/// This struct wraps the AWS DynamoDB SDK client and provides
/// application-specific database operations.
#[derive(Clone)]
pub struct DynamoDbClient {
    /// Application settings
    settings: Arc<Settings>,

    /// AWS DynamoDB SDK client
    client: DynamoDbSdkClient,
}

impl DynamoDbClient {
    /// Create a new DynamoDB client.
    ///
    /// # Arguments
    /// * `settings` - Application settings containing DynamoDB configuration
    /// * `client` - AWS DynamoDB SDK client
    pub fn new(settings: Arc<Settings>, client: DynamoDbSdkClient) -> Self {
        Self { settings, client }
    }

    /// Get a reference to the underlying AWS SDK client
    pub fn client(&self) -> &DynamoDbSdkClient {
        &self.client
    }

    /// Get the users table name
    pub fn users_table(&self) -> &str {
        &self.settings.dynamodb_users_table
    }

    /// Create the users table (partition key `UserId`, on-demand billing).
    ///
    /// A `ResourceInUseException` means another caller got there first and is
    /// reported as [`TableStatus::AlreadyExists`]. When
    /// `wait_for_table_active` is set, a freshly created table is polled
    /// until it reports ACTIVE.
    pub async fn ensure_users_table(&self) -> Result<TableStatus, StoreError> {
        let table_name = self.users_table();

        let attribute = AttributeDefinition::builder()
            .attribute_name(USER_ID_ATTR)
            .attribute_type(ScalarAttributeType::S)
            .build()
            .map_err(|e| StoreError::DynamoDb(e.to_string()))?;
        let key = KeySchemaElement::builder()
            .attribute_name(USER_ID_ATTR)
            .key_type(KeyType::Hash)
            .build()
            .map_err(|e| StoreError::DynamoDb(e.to_string()))?;

        let result = self
            .client
            .create_table()
            .table_name(table_name)
            .attribute_definitions(attribute)
            .key_schema(key)
            .billing_mode(BillingMode::PayPerRequest)
            .send()
            .await;

        match result {
            Ok(output) => {
                let created = output
                    .table_description()
                    .and_then(|d| d.table_name())
                    .unwrap_or(table_name);
                tracing::debug!(table = %created, "CreateTable accepted");

                if self.settings.wait_for_table_active {
                    self.wait_until_active(self.settings.table_active_timeout())
                        .await?;
                }

                Ok(TableStatus::Created)
            }
            Err(err)
                if err
                    .as_service_error()
                    .is_some_and(|e| e.is_resource_in_use_exception()) =>
            {
                tracing::debug!(table = %table_name, "CreateTable reported ResourceInUse");
                Ok(TableStatus::AlreadyExists)
            }
            Err(err) => Err(StoreError::dynamodb("CreateTable", err)),
        }
    }

    /// Poll DescribeTable until the users table is ACTIVE or `timeout` elapses
    pub async fn wait_until_active(&self, timeout: Duration) -> Result<(), StoreError> {
        let deadline = tokio::time::Instant::now() + timeout;

        loop {
            let output = self
                .client
                .describe_table()
                .table_name(self.users_table())
                .send()
                .await
                .map_err(|e| StoreError::dynamodb("DescribeTable", e))?;

            let status = output.table().and_then(|t| t.table_status()).cloned();
            if status == Some(SdkTableStatus::Active) {
                tracing::debug!(table = %self.users_table(), "Table is active");
                return Ok(());
            }

            if tokio::time::Instant::now() >= deadline {
                return Err(StoreError::TableNotActive(format!(
                    "{} still {:?} after {}s",
                    self.users_table(),
                    status,
                    timeout.as_secs()
                )));
            }

            tracing::debug!(table = %self.users_table(), status = ?status, "Waiting for table");
            tokio::time::sleep(TABLE_POLL_INTERVAL).await;
        }
    }

    /// Check if the DynamoDB connection is healthy
    ///
    /// Performs a simple list_tables operation to verify connectivity.
    pub async fn health_check(&self) -> bool {
        match self.client.list_tables().limit(1).send().await {
            Ok(_) => {
                tracing::debug!("DynamoDB health check passed");
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "DynamoDB health check failed");
                false
            }
        }
    }
}
