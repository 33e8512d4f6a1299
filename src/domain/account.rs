//! Account domain entity and related types.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

/// Normalize an email for lookup and uniqueness comparison.
///
/// The registry's uniqueness guarantee depends on every lookup and insert
/// going through this: trimmed, lowercased.
pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Account domain entity.
///
/// Immutable once created; the optional fields are opaque display metadata
/// stored as given, never validated or interpreted.
#[derive(Debug, Clone, Serialize)]
pub struct Account {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub name: String,
    pub phone: Option<String>,
    pub position: Option<String>,
    pub security_code: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Data required to persist a new account.
///
/// `email` must already be normalized and `password_hash` must come from
/// the credential hasher; this type never carries a plaintext password.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub email: String,
    pub name: String,
    pub password_hash: String,
    pub phone: Option<String>,
    pub position: Option<String>,
    pub security_code: Option<String>,
}

/// Signup input handed from the HTTP boundary to the auth service.
#[derive(Clone)]
pub struct SignupData {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone: Option<String>,
    pub position: Option<String>,
    pub security_code: Option<String>,
}

// The plaintext credential must never leak through debug output
impl std::fmt::Debug for SignupData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignupData")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("phone", &self.phone)
            .field("position", &self.position)
            .field("security_code", &self.security_code)
            .finish()
    }
}

/// Public account summary (safe to return to clients).
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AccountSummary {
    /// Unique account identifier
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub id: Uuid,
    /// Display name
    #[schema(example = "Alice")]
    pub name: String,
    /// Normalized email address
    #[schema(example = "a@b.com")]
    pub email: String,
}

impl From<&Account> for AccountSummary {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id,
            name: account.name.clone(),
            email: account.email.clone(),
        }
    }
}

impl From<Account> for AccountSummary {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            name: account.name,
            email: account.email,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalization_trims_and_lowercases() {
        assert_eq!(normalize_email("  Foo@Bar.com "), "foo@bar.com");
        assert_eq!(normalize_email("a@b.com"), "a@b.com");
        assert_eq!(normalize_email("\tUPPER@CASE.IO\n"), "upper@case.io");
    }

    #[test]
    fn normalization_is_idempotent() {
        let once = normalize_email("  Foo@Bar.com ");
        assert_eq!(normalize_email(&once), once);
    }

    #[test]
    fn signup_data_debug_redacts_password() {
        let data = SignupData {
            name: "Alice".to_string(),
            email: "a@b.com".to_string(),
            password: "secret1".to_string(),
            phone: None,
            position: None,
            security_code: None,
        };
        let rendered = format!("{:?}", data);
        assert!(rendered.contains("[REDACTED]"));
        assert!(!rendered.contains("secret1"));
    }
}
