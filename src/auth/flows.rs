use actix_web::HttpRequest;
use log::{error, info, warn};
use thiserror::Error;

use super::sessions::SessionStore;
use crate::models::account::AccountId;
use crate::store::{AccountStore, StoreError};

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Missing username or password")]
    MissingField,

    #[error("Username is taken: {0}")]
    UsernameTaken(String),

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Internal error: {0}")]
    Internal(#[source] StoreError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Authenticated {
    pub username: String,
}

fn required(value: Option<&str>) -> Result<&str, AuthError> {
    match value {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(AuthError::MissingField),
    }
}

pub async fn register<S: AccountStore>(
    store: &S,
    username: Option<&str>,
    password: Option<&str>,
) -> Result<AccountId, AuthError> {
    let username = required(username)?;
    let password = required(password)?;

    match store.insert_account(username, password).await {
        Ok(id) => {
            info!("New user registered: {} (id {})", username, id);
            Ok(id)
        }
        Err(StoreError::DuplicateUsername(name)) => {
            info!("Registration rejected, username taken: {}", name);
            Err(AuthError::UsernameTaken(name))
        }
        Err(e) => {
            error!("Registration error for {}: {}", username, e);
            Err(AuthError::Internal(e))
        }
    }
}

/// Unknown usernames and wrong passwords both come back as
/// `InvalidCredentials`.
pub async fn login<S: AccountStore>(
    store: &S,
    username: Option<&str>,
    password: Option<&str>,
) -> Result<Authenticated, AuthError> {
    let username = required(username)?;
    let password = required(password)?;

    match store.find_account(username, password).await {
        Ok(Some(account)) => {
            info!("Login successful for user: {}", account.username);
            Ok(Authenticated {
                username: account.username,
            })
        }
        Ok(None) => {
            warn!("Invalid login attempt for user: {}", username);
            Err(AuthError::InvalidCredentials)
        }
        Err(e) => {
            error!("Login error for {}: {}", username, e);
            Err(AuthError::Internal(e))
        }
    }
}

pub async fn logout(sessions: &SessionStore, req: &HttpRequest) {
    if sessions.destroy(req).await {
        info!("Session destroyed");
    }
}
