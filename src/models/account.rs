use chrono::NaiveDateTime;
use serde::Serialize;
use sqlx::FromRow;

pub type AccountId = i64;

/// A row of the `users` table.
///
/// The password is stored and compared exactly as submitted and is never
/// serialized out of the service.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Account {
    pub id: AccountId,
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub created_at: NaiveDateTime,
}
