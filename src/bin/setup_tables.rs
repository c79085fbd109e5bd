//! CLI tool to create the users table ahead of the first invocation
//!
//! Usage:
//!   cargo run --bin setup_tables
//!
//! For local development with DynamoDB Local:
//!   DYNAMODB_ENDPOINT_URL=http://localhost:8001 cargo run --bin setup_tables

use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use user_profile_lambda::{
    config::{create_dynamodb_client, Settings},
    db::{DynamoDbClient, TableStatus},
};

/// Create the DynamoDB users table
#[derive(Parser, Debug)]
#[command(name = "setup_tables")]
#[command(about = "Create the DynamoDB users table for the user profile function")]
struct Args {
    /// DynamoDB endpoint URL (for local development)
    #[arg(long)]
    endpoint_url: Option<String>,

    /// Table name (overrides DYNAMODB_USERS_TABLE)
    #[arg(long)]
    table: Option<String>,

    /// AWS region (overrides AWS_REGION)
    #[arg(long)]
    region: Option<String>,

    /// Wait until a newly created table is ACTIVE
    #[arg(long)]
    wait: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut settings = Settings::load()?;
    if let Some(url) = args.endpoint_url {
        settings.dynamodb_endpoint_url = Some(url);
    }
    if let Some(table) = args.table {
        settings.dynamodb_users_table = table;
    }
    if let Some(region) = args.region {
        settings.aws_region = region;
    }
    if args.wait {
        settings.wait_for_table_active = true;
    }
    settings.validate()?;

    if let Some(ref url) = settings.dynamodb_endpoint_url {
        println!("Using DynamoDB endpoint: {}", url);
    }

    let settings = Arc::new(settings);
    let sdk_client = create_dynamodb_client(&settings).await;
    let client = DynamoDbClient::new(settings.clone(), sdk_client);

    if !client.health_check().await {
        anyhow::bail!("Cannot reach DynamoDB in region {}", settings.aws_region);
    }

    let table = client.users_table().to_string();
    let status = client
        .ensure_users_table()
        .await
        .with_context(|| format!("Failed to create table {}", table))?;

    match status {
        TableStatus::Created => println!("Created table: {}", table),
        TableStatus::AlreadyExists => println!("Table already exists: {}", table),
    }

    Ok(())
}
