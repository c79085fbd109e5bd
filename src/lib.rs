//! User profile lifecycle Lambda library

// Public modules
pub mod config;
pub mod db;
pub mod error;
pub mod handler;
pub mod logging;

// Re-export commonly used types
pub use config::Settings;
pub use db::{TableStatus, UserProfile, UserStore};
pub use error::StoreError;
pub use handler::RecordLifecycleHandler;
