use std::str::FromStr;

use log::info;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use super::{AccountStore, StoreError};
use crate::models::account::{Account, AccountId};

const CREATE_USERS_TABLE: &str = "CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT NOT NULL UNIQUE,
    password TEXT NOT NULL,
    created_at TEXT NOT NULL DEFAULT (datetime('now'))
)";

#[derive(Debug, Clone)]
pub struct SqliteAccountStore {
    pool: SqlitePool,
}

impl SqliteAccountStore {
    /// Opens (or creates) the database file behind `database_url` and makes
    /// sure the `users` table exists.
    pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        let store = Self { pool };
        store.init_schema().await?;
        Ok(store)
    }

    /// Private in-memory database, used by tests.
    pub async fn in_memory() -> Result<Self, StoreError> {
        // One connection that never idles out, otherwise the database vanishes.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await?;

        let store = Self { pool };
        store.init_schema().await?;
        Ok(store)
    }

    pub async fn init_schema(&self) -> Result<(), StoreError> {
        sqlx::query(CREATE_USERS_TABLE).execute(&self.pool).await?;
        info!("Users table initialized");
        Ok(())
    }
}

impl AccountStore for SqliteAccountStore {
    async fn insert_account(&self, username: &str, password: &str) -> Result<AccountId, StoreError> {
        let result = sqlx::query("INSERT INTO users (username, password) VALUES (?, ?)")
            .bind(username)
            .bind(password)
            .execute(&self.pool)
            .await;

        match result {
            Ok(done) => Ok(done.last_insert_rowid()),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(StoreError::DuplicateUsername(username.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn find_account(&self, username: &str, password: &str) -> Result<Option<Account>, StoreError> {
        let account = sqlx::query_as::<_, Account>(
            "SELECT id, username, password, created_at FROM users WHERE username = ? AND password = ?",
        )
        .bind(username)
        .bind(password)
        .fetch_optional(&self.pool)
        .await?;

        Ok(account)
    }

    async fn list_accounts(&self) -> Result<Vec<Account>, StoreError> {
        let accounts = sqlx::query_as::<_, Account>(
            "SELECT id, username, password, created_at FROM users ORDER BY id ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(accounts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[actix_web::test]
    async fn ids_are_assigned_in_insertion_order() {
        let store = SqliteAccountStore::in_memory().await.unwrap();

        let first = store.insert_account("alice", "pw1").await.unwrap();
        let second = store.insert_account("bob", "pw2").await.unwrap();

        assert!(second > first);
    }

    #[actix_web::test]
    async fn duplicate_username_is_a_typed_error() {
        let store = SqliteAccountStore::in_memory().await.unwrap();
        store.insert_account("alice", "pw1").await.unwrap();

        let err = store.insert_account("alice", "pw2").await.unwrap_err();

        assert!(matches!(err, StoreError::DuplicateUsername(ref name) if name == "alice"));
        assert_eq!(store.list_accounts().await.unwrap().len(), 1);
    }

    #[actix_web::test]
    async fn usernames_are_case_sensitive() {
        let store = SqliteAccountStore::in_memory().await.unwrap();
        store.insert_account("alice", "pw").await.unwrap();
        store.insert_account("Alice", "pw").await.unwrap();

        assert!(store.find_account("ALICE", "pw").await.unwrap().is_none());
        let found = store.find_account("Alice", "pw").await.unwrap().unwrap();
        assert_eq!(found.username, "Alice");
    }

    #[actix_web::test]
    async fn find_requires_both_fields_to_match() {
        let store = SqliteAccountStore::in_memory().await.unwrap();
        store.insert_account("alice", "pw1").await.unwrap();

        assert!(store.find_account("alice", "pw2").await.unwrap().is_none());
        assert!(store.find_account("bob", "pw1").await.unwrap().is_none());
        assert!(store.find_account("alice", "pw1").await.unwrap().is_some());
    }

    #[actix_web::test]
    async fn list_is_ordered_by_id() {
        let store = SqliteAccountStore::in_memory().await.unwrap();
        for name in ["carol", "alice", "bob"] {
            store.insert_account(name, "pw").await.unwrap();
        }

        let names: Vec<String> = store
            .list_accounts()
            .await
            .unwrap()
            .into_iter()
            .map(|account| account.username)
            .collect();

        assert_eq!(names, ["carol", "alice", "bob"]);
    }
}
