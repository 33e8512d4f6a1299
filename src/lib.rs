//! VoiceUp Backend - credential-management service
//!
//! Registers user accounts, verifies login credentials, and issues signed
//! session tokens.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Account entity, Password value object, email normalization
//! - **services**: Auth orchestration and token issuance
//! - **infra**: Database, migrations, account repository
//! - **api**: HTTP handlers, middleware, and routes
//! - **types**: Shared response envelope types
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server
//! cargo run -- serve
//!
//! # Run migrations
//! cargo run -- migrate up
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;
pub mod types;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::{Account, AccountSummary, Password};
pub use errors::{AppError, AppResult};
