//! Account repository - the registry of accounts keyed by normalized email.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set, SqlErr,
};

use super::entities::account::{ActiveModel, Column, Entity as AccountEntity};
use crate::domain::{Account, NewAccount};
use crate::errors::{AppError, AppResult};

/// Account registry contract.
///
/// Callers must pass normalized emails (see `domain::normalize_email`);
/// the registry does not re-normalize.
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Look up an account by normalized email.
    async fn find_by_email(&self, email: &str) -> AppResult<Option<Account>>;

    /// Insert a new account.
    ///
    /// Returns `AppError::DuplicateEmail` when the store's unique email
    /// constraint rejects the insert.
    async fn insert(&self, account: NewAccount) -> AppResult<Account>;
}

/// SeaORM-backed account store.
pub struct AccountStore {
    db: DatabaseConnection,
}

impl AccountStore {
    /// Create a new store over a database connection.
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AccountRepository for AccountStore {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<Account>> {
        let model = AccountEntity::find()
            .filter(Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(model.map(Account::from))
    }

    async fn insert(&self, account: NewAccount) -> AppResult<Account> {
        let active_model = ActiveModel {
            id: Set(uuid::Uuid::new_v4()),
            email: Set(account.email),
            name: Set(account.name),
            password_hash: Set(account.password_hash),
            phone: Set(account.phone),
            position: Set(account.position),
            security_code: Set(account.security_code),
            created_at: Set(chrono::Utc::now()),
        };

        let model = active_model.insert(&self.db).await.map_err(|e| {
            match e.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => AppError::DuplicateEmail,
                _ => AppError::from(e),
            }
        })?;

        Ok(Account::from(model))
    }
}
