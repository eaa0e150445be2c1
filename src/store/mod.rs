use std::future::Future;

use thiserror::Error;

use crate::models::account::{Account, AccountId};

pub mod sqlite;

pub use sqlite::SqliteAccountStore;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Username already exists: {0}")]
    DuplicateUsername(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub trait AccountStore {
    /// Inserts a new account. Uniqueness of `username` is enforced by the
    /// store in the same statement, so a taken name yields
    /// `StoreError::DuplicateUsername` and writes nothing.
    fn insert_account(
        &self,
        username: &str,
        password: &str,
    ) -> impl Future<Output = Result<AccountId, StoreError>> + Send;

    /// Returns the account whose username and password both match exactly.
    fn find_account(
        &self,
        username: &str,
        password: &str,
    ) -> impl Future<Output = Result<Option<Account>, StoreError>> + Send;

    /// All accounts ordered by id ascending.
    fn list_accounts(&self) -> impl Future<Output = Result<Vec<Account>, StoreError>> + Send;
}
