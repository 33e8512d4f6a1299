//! Infrastructure layer - External systems integration
//!
//! Handles the persistent account store: database connection management,
//! schema migrations, and the account repository.

pub mod db;
pub mod repositories;

pub use db::{Database, Migrator};
pub use repositories::{AccountRepository, AccountStore};
