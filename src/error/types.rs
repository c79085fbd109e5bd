//! Store error types

use aws_sdk_dynamodb::error::{ProvideErrorMetadata, SdkError};
use aws_smithy_types::error::display::DisplayErrorContext;
use std::fmt::Debug;
use thiserror::Error;

/// Errors that can occur while provisioning the table or touching records.
///
/// "Table already exists" is not represented here: it is recovered locally
/// and reported as [`crate::db::TableStatus::AlreadyExists`].
#[derive(Error, Debug)]
pub enum StoreError {
    /// The service answered with an error code (throttling, access denied, ...)
    #[error("DynamoDB {operation} rejected with {code}: {message}")]
    Service {
        operation: String,
        code: String,
        message: String,
    },

    /// The request never got a service answer (network, timeout, credentials, ...)
    #[error("DynamoDB error: {0}")]
    DynamoDb(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Missing or mistyped attribute: {0}")]
    MissingAttribute(String),

    #[error("Table did not become active: {0}")]
    TableNotActive(String),
}

impl StoreError {
    /// Map an SDK error, keeping the service error code when there is one.
    pub fn dynamodb<E, R>(operation: &str, err: SdkError<E, R>) -> Self
    where
        E: ProvideErrorMetadata + std::error::Error + 'static,
        R: Debug,
    {
        if let Some(service) = err.as_service_error() {
            return StoreError::Service {
                operation: operation.to_string(),
                code: service.code().unwrap_or("Unknown").to_string(),
                message: service.message().unwrap_or_default().to_string(),
            };
        }

        StoreError::DynamoDb(format!("{} failed: {}", operation, DisplayErrorContext(err)))
    }

    /// Service error code, if the service answered
    pub fn code(&self) -> Option<&str> {
        match self {
            StoreError::Service { code, .. } => Some(code),
            _ => None,
        }
    }
}
