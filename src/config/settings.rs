//! Application settings and configuration
//!
//! This module provides configuration management for the function,
//! loading settings from environment variables with sensible defaults.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::time::Duration;

/// Application environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Staging,
    Production,
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Staging => write!(f, "staging"),
            Environment::Production => write!(f, "production"),
        }
    }
}

impl Default for Environment {
    fn default() -> Self {
        Environment::Development
    }
}

impl std::str::FromStr for Environment {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "staging" | "stage" => Ok(Environment::Staging),
            "production" | "prod" => Ok(Environment::Production),
            _ => anyhow::bail!("Invalid environment: {}. Expected: development, staging, or production", s),
        }
    }
}

/// Output format for log lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Text,
    Json,
}

impl Default for LogFormat {
    fn default() -> Self {
        LogFormat::Text
    }
}

impl std::str::FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "plain" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            _ => anyhow::bail!("Invalid log format: {}. Expected: text or json", s),
        }
    }
}

/// Which store implementation backs the handler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    DynamoDb,
    Memory,
}

impl Default for StoreBackend {
    fn default() -> Self {
        StoreBackend::DynamoDb
    }
}

impl fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreBackend::DynamoDb => write!(f, "dynamodb"),
            StoreBackend::Memory => write!(f, "memory"),
        }
    }
}

impl std::str::FromStr for StoreBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dynamodb" | "dynamo" => Ok(StoreBackend::DynamoDb),
            "memory" | "mem" => Ok(StoreBackend::Memory),
            _ => anyhow::bail!("Invalid store backend: {}. Expected: dynamodb or memory", s),
        }
    }
}

/// Main application settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    // App settings
    pub app_name: String,
    pub app_version: String,
    pub environment: Environment,
    pub log_level: String,
    pub log_format: LogFormat,

    // AWS settings
    pub aws_region: String,
    pub dynamodb_endpoint_url: Option<String>,

    // DynamoDB table
    pub dynamodb_users_table: String,

    // Store
    pub store_backend: StoreBackend,

    /// Poll a freshly created table until it reports ACTIVE
    pub wait_for_table_active: bool,
    pub table_active_timeout_seconds: u64,
}

impl Settings {
    /// Load settings from environment variables with defaults
    pub fn load() -> Result<Self> {
        // Load .env file if it exists (absent in a deployed function)
        dotenvy::dotenv().ok();

        let settings = Self {
            app_name: env_or_default("APP_NAME", "user-profile-lambda"),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            environment: env_or_default("ENVIRONMENT", "development")
                .parse()
                .unwrap_or_default(),
            log_level: env_or_default("LOG_LEVEL", "info"),
            log_format: env_or_default("LOG_FORMAT", "text")
                .parse()
                .context("Invalid LOG_FORMAT value")?,

            aws_region: env_or_default("AWS_REGION", "eu-north-1"),
            dynamodb_endpoint_url: env::var("DYNAMODB_ENDPOINT_URL").ok(),

            dynamodb_users_table: env_or_default("DYNAMODB_USERS_TABLE", "Users"),

            store_backend: env_or_default("STORE_BACKEND", "dynamodb")
                .parse()
                .context("Invalid STORE_BACKEND value")?,

            wait_for_table_active: parse_flag(&env_or_default("WAIT_FOR_TABLE_ACTIVE", "false"))
                .context("Invalid WAIT_FOR_TABLE_ACTIVE value")?,
            table_active_timeout_seconds: env_or_default("TABLE_ACTIVE_TIMEOUT_SECONDS", "30")
                .parse()
                .context("Invalid TABLE_ACTIVE_TIMEOUT_SECONDS value")?,
        };

        settings.validate()?;

        Ok(settings)
    }

    /// Validate settings
    pub fn validate(&self) -> Result<()> {
        if self.dynamodb_users_table.trim().is_empty() {
            anyhow::bail!("DYNAMODB_USERS_TABLE cannot be empty");
        }

        if self.wait_for_table_active && self.table_active_timeout_seconds == 0 {
            anyhow::bail!("TABLE_ACTIVE_TIMEOUT_SECONDS must be > 0 when WAIT_FOR_TABLE_ACTIVE is set");
        }

        if self.environment == Environment::Production && self.store_backend == StoreBackend::Memory {
            tracing::warn!("Running in production with the in-memory store, nothing will be persisted");
        }

        Ok(())
    }

    /// Bound for the table-active poll
    pub fn table_active_timeout(&self) -> Duration {
        Duration::from_secs(self.table_active_timeout_seconds)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            app_name: "user-profile-lambda".to_string(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            environment: Environment::Development,
            log_level: "info".to_string(),
            log_format: LogFormat::Text,
            aws_region: "eu-north-1".to_string(),
            dynamodb_endpoint_url: None,
            dynamodb_users_table: "Users".to_string(),
            store_backend: StoreBackend::DynamoDb,
            wait_for_table_active: false,
            table_active_timeout_seconds: 30,
        }
    }
}

/// Helper function to get environment variable with default
fn env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse a boolean flag, rejecting anything that is not a recognised spelling
fn parse_flag(value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" | "" => Ok(false),
        other => anyhow::bail!("Invalid boolean: {}. Expected: true/false, 1/0, yes/no, on/off", other),
    }
}
