//! Authentication service - signup and login orchestration.
//!
//! Ties the credential hasher, account registry, and token issuer together.
//! The service is stateless; every request is handled independently.

use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;

use crate::domain::{normalize_email, AccountSummary, NewAccount, Password, SignupData};
use crate::errors::{AppError, AppResult};
use crate::infra::AccountRepository;
use crate::services::token::{Claims, TokenIssuer};

/// Valid-looking hash verified when the account does not exist, so that the
/// unknown-email path costs one Argon2 verification just like the
/// wrong-password path. Prevents timing-based account enumeration.
const DUMMY_PASSWORD_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$dummysalt123456$dummyhash1234567890123456789012";

/// Session returned after a successful login.
#[derive(Debug, Serialize)]
pub struct LoginSession {
    pub token: String,
    pub user: AccountSummary,
}

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Register a new account. Success returns no token; the user logs in
    /// separately.
    async fn signup(&self, data: SignupData) -> AppResult<()>;

    /// Verify credentials and mint a session token.
    async fn login(&self, email: String, password: String) -> AppResult<LoginSession>;

    /// Verify a session token and extract its claims.
    fn verify_token(&self, token: &str) -> AppResult<Claims>;
}

/// Concrete implementation of AuthService.
pub struct Authenticator {
    accounts: Arc<dyn AccountRepository>,
    tokens: TokenIssuer,
}

impl Authenticator {
    /// Create a new auth service instance.
    pub fn new(accounts: Arc<dyn AccountRepository>, tokens: TokenIssuer) -> Self {
        Self { accounts, tokens }
    }
}

#[async_trait]
impl AuthService for Authenticator {
    async fn signup(&self, data: SignupData) -> AppResult<()> {
        let email = normalize_email(&data.email);
        let name = data.name.trim().to_string();

        // Defense in depth: the HTTP boundary validates length too
        let password_hash = Password::new(&data.password)?.into_string();

        let account = NewAccount {
            email,
            name,
            password_hash,
            phone: trimmed(data.phone),
            position: trimmed(data.position),
            security_code: trimmed(data.security_code),
        };

        // Uniqueness is enforced by the store's unique index, not by a
        // check-then-insert; concurrent signups race safely.
        match self.accounts.insert(account).await {
            Ok(_) => Ok(()),
            Err(AppError::DuplicateEmail) => Err(AppError::DuplicateEmail),
            Err(e) => {
                tracing::error!("Account insert failed: {:?}", e);
                Err(AppError::SignupFailed)
            }
        }
    }

    async fn login(&self, email: String, password: String) -> AppResult<LoginSession> {
        let email = normalize_email(&email);
        let account = self.accounts.find_by_email(&email).await?;

        let stored = match &account {
            Some(account) => Password::from_hash(account.password_hash.clone()),
            None => Password::from_hash(DUMMY_PASSWORD_HASH.to_string()),
        };
        let password_valid = stored.verify(&password);

        match account {
            Some(account) if password_valid => {
                let token = self.tokens.issue(&account)?;
                Ok(LoginSession {
                    token,
                    user: AccountSummary::from(account),
                })
            }
            // Identical outcome for unknown email and wrong password, so
            // responses cannot be used to enumerate accounts
            _ => Err(AppError::InvalidCredentials),
        }
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        self.tokens.verify(token)
    }
}

/// Trim optional metadata; empty strings collapse to None.
fn trimmed(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
