//! Auth service unit tests.
//!
//! The account repository is mocked so the tests exercise the service's
//! orchestration: normalization, hashing, duplicate mapping, and the
//! indistinguishable login failure paths.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use mockall::predicate::eq;
use uuid::Uuid;

use voiceup_backend::config::Config;
use voiceup_backend::domain::{Account, NewAccount, Password, SignupData};
use voiceup_backend::errors::{AppError, AppResult};
use voiceup_backend::infra::AccountRepository;
use voiceup_backend::services::{AuthService, Authenticator, TokenIssuer};

mockall::mock! {
    Accounts {}

    #[async_trait]
    impl AccountRepository for Accounts {
        async fn find_by_email(&self, email: &str) -> AppResult<Option<Account>>;
        async fn insert(&self, account: NewAccount) -> AppResult<Account>;
    }
}

fn test_account(password: &str) -> Account {
    Account {
        id: Uuid::new_v4(),
        email: "a@b.com".to_string(),
        password_hash: Password::new(password).unwrap().into_string(),
        name: "Alice".to_string(),
        phone: None,
        position: None,
        security_code: None,
        created_at: Utc::now(),
    }
}

fn signup_data(name: &str, email: &str, password: &str) -> SignupData {
    SignupData {
        name: name.to_string(),
        email: email.to_string(),
        password: password.to_string(),
        phone: None,
        position: None,
        security_code: None,
    }
}

fn service(repo: MockAccounts) -> Authenticator {
    let tokens = TokenIssuer::new(&Config::for_tests(
        "test-secret-key-for-testing-only-32chars",
        60,
    ));
    Authenticator::new(Arc::new(repo), tokens)
}

#[tokio::test]
async fn signup_normalizes_email_and_stores_hash() {
    let mut repo = MockAccounts::new();
    repo.expect_insert()
        .withf(|account: &NewAccount| {
            account.email == "foo@bar.com"
                && account.name == "Alice"
                && account.password_hash.starts_with("$argon2")
                && account.password_hash != "secret1"
        })
        .returning(|account| {
            Ok(Account {
                id: Uuid::new_v4(),
                email: account.email,
                password_hash: account.password_hash,
                name: account.name,
                phone: account.phone,
                position: account.position,
                security_code: account.security_code,
                created_at: Utc::now(),
            })
        });

    let service = service(repo);
    let result = service
        .signup(signup_data("  Alice ", " Foo@Bar.com ", "secret1"))
        .await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn signup_duplicate_email_maps_to_conflict() {
    let mut repo = MockAccounts::new();
    repo.expect_insert()
        .returning(|_| Err(AppError::DuplicateEmail));

    let service = service(repo);
    let result = service.signup(signup_data("Alice", "a@b.com", "secret1")).await;

    assert!(matches!(result.unwrap_err(), AppError::DuplicateEmail));
}

#[tokio::test]
async fn signup_other_store_failure_maps_to_signup_failed() {
    let mut repo = MockAccounts::new();
    repo.expect_insert()
        .returning(|_| Err(AppError::internal("store unavailable")));

    let service = service(repo);
    let result = service.signup(signup_data("Alice", "a@b.com", "secret1")).await;

    assert!(matches!(result.unwrap_err(), AppError::SignupFailed));
}

#[tokio::test]
async fn signup_short_password_never_reaches_store() {
    // No insert expectation: the mock panics if the service tries to insert
    let repo = MockAccounts::new();

    let service = service(repo);
    let result = service.signup(signup_data("Alice", "a@b.com", "abc")).await;

    match result.unwrap_err() {
        AppError::Validation(msg) => {
            assert_eq!(msg, "Password must be at least 6 characters.")
        }
        other => panic!("expected validation error, got {:?}", other),
    }
}

#[tokio::test]
async fn login_success_returns_verifiable_token() {
    let account = test_account("secret1");
    let account_id = account.id;

    let mut repo = MockAccounts::new();
    repo.expect_find_by_email()
        .with(eq("a@b.com"))
        .returning(move |_| Ok(Some(account.clone())));

    let service = service(repo);
    // Mixed case and whitespace exercise lookup normalization
    let session = service
        .login("  A@B.com ".to_string(), "secret1".to_string())
        .await
        .unwrap();

    assert!(!session.token.is_empty());
    assert_eq!(session.user.id, account_id);
    assert_eq!(session.user.email, "a@b.com");
    assert_eq!(session.user.name, "Alice");

    let claims = service.verify_token(&session.token).unwrap();
    assert_eq!(claims.sub, account_id);
    assert_eq!(claims.email, "a@b.com");
    assert!(claims.exp > claims.iat);
}

#[tokio::test]
async fn login_wrong_password_is_invalid_credentials() {
    let account = test_account("secret1");

    let mut repo = MockAccounts::new();
    repo.expect_find_by_email()
        .returning(move |_| Ok(Some(account.clone())));

    let service = service(repo);
    let result = service
        .login("a@b.com".to_string(), "wrong".to_string())
        .await;

    assert!(matches!(result.unwrap_err(), AppError::InvalidCredentials));
}

#[tokio::test]
async fn login_unknown_email_is_invalid_credentials() {
    let mut repo = MockAccounts::new();
    repo.expect_find_by_email().returning(|_| Ok(None));

    let service = service(repo);
    let result = service
        .login("nobody@b.com".to_string(), "secret1".to_string())
        .await;

    // Same error as the wrong-password path; no account enumeration
    assert!(matches!(result.unwrap_err(), AppError::InvalidCredentials));
}

#[tokio::test]
async fn login_store_failure_is_not_unauthorized() {
    let mut repo = MockAccounts::new();
    repo.expect_find_by_email()
        .returning(|_| Err(AppError::internal("store unavailable")));

    let service = service(repo);
    let result = service
        .login("a@b.com".to_string(), "secret1".to_string())
        .await;

    assert!(matches!(result.unwrap_err(), AppError::Internal(_)));
}

#[tokio::test]
async fn verify_token_rejects_garbage() {
    let service = service(MockAccounts::new());
    assert!(service.verify_token("not-a-token").is_err());
}
