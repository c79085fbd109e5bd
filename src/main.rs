//! User Profile Lambda
//!
//! Lambda entry point: provisions the users table and runs a put/get/delete
//! cycle on each invocation, answering with the uppercased input.

use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use std::sync::Arc;
use user_profile_lambda::{
    config::Settings,
    handler::{function_handler, RecordLifecycleHandler},
    logging::init_tracing,
};

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Load configuration first (before logging, so we can use log_level)
    let settings = Settings::load()?;

    init_tracing(&settings.log_level, settings.log_format)?;

    tracing::info!(
        app_name = %settings.app_name,
        version = %settings.app_version,
        environment = %settings.environment,
        region = %settings.aws_region,
        table = %settings.dynamodb_users_table,
        "Starting function"
    );

    let handler = RecordLifecycleHandler::from_settings(Arc::new(settings)).await;

    run(service_fn(|event: LambdaEvent<String>| {
        function_handler(&handler, event)
    }))
    .await
}
