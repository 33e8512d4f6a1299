//! Application state - Dependency injection container.

use std::sync::Arc;

use crate::config::Config;
use crate::infra::{AccountStore, Database};
use crate::services::{AuthService, Authenticator, TokenIssuer};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Authentication service
    pub auth_service: Arc<dyn AuthService>,
}

impl AppState {
    /// Create application state from database connection and config.
    pub fn from_config(database: Arc<Database>, config: Config) -> Self {
        let accounts = Arc::new(AccountStore::new(database.get_connection()));
        let tokens = TokenIssuer::new(&config);
        let auth_service = Arc::new(Authenticator::new(accounts, tokens));

        Self { auth_service }
    }

    /// Create application state with a manually injected service. Used by
    /// tests to substitute mocks.
    pub fn new(auth_service: Arc<dyn AuthService>) -> Self {
        Self { auth_service }
    }
}
