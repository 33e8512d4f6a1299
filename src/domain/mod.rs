//! Domain layer - Core business entities and logic
//!
//! Contains the core models for accounts and credentials, independent of
//! infrastructure concerns: the Account entity, the Password value object,
//! and email normalization (the registry uniqueness key).

pub mod account;
pub mod password;

pub use account::{normalize_email, Account, AccountSummary, NewAccount, SignupData};
pub use password::Password;
