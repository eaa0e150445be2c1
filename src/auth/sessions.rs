// Anonymous clients have no entry; one is created on successful login.

use std::collections::HashMap;
use std::time::Duration;

use actix_web::cookie::{time, Cookie};
use actix_web::{web, HttpRequest};
use chrono::{DateTime, Utc};
use log::info;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::session::SessionState;

pub const SESSION_COOKIE: &str = "session_id";

#[derive(Debug)]
struct SessionEntry {
    state: SessionState,
    expires_at: Option<DateTime<Utc>>,
}

impl SessionEntry {
    fn is_expired(&self, now: DateTime<Utc>) -> bool {
        matches!(self.expires_at, Some(expires_at) if expires_at <= now)
    }
}

#[derive(Debug, Default)]
pub struct SessionStore {
    entries: RwLock<HashMap<Uuid, SessionEntry>>,
    ttl: Option<Duration>,
}

impl SessionStore {
    /// `None` keeps sessions until logout.
    pub fn new(ttl: Option<Duration>) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    pub fn ttl(&self) -> Option<Duration> {
        self.ttl
    }

    pub fn session_id(req: &HttpRequest) -> Option<Uuid> {
        req.cookie(SESSION_COOKIE)
            .and_then(|cookie| Uuid::parse_str(cookie.value()).ok())
    }

    pub async fn get(&self, req: &HttpRequest) -> SessionState {
        match Self::session_id(req) {
            Some(id) => self.get_by_id(id).await,
            None => SessionState::default(),
        }
    }

    /// Stores `state` for the request's session and returns the id the
    /// client must carry. A live session keeps its id; otherwise a new one
    /// is minted.
    pub async fn set(&self, req: &HttpRequest, state: SessionState) -> Uuid {
        let now = Utc::now();
        let mut entries = self.entries.write().await;

        let id = Self::session_id(req)
            .filter(|id| entries.get(id).is_some_and(|entry| !entry.is_expired(now)))
            .unwrap_or_else(Uuid::new_v4);

        entries.insert(
            id,
            SessionEntry {
                state,
                expires_at: self.expiry_from(now),
            },
        );
        id
    }

    pub async fn destroy(&self, req: &HttpRequest) -> bool {
        match Self::session_id(req) {
            Some(id) => self.entries.write().await.remove(&id).is_some(),
            None => false,
        }
    }

    pub async fn purge_expired(&self) -> usize {
        let now = Utc::now();
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired(now));
        before - entries.len()
    }

    /// Cookie handing `id` to the client, with a `Max-Age` matching the TTL.
    pub fn cookie(&self, id: Uuid) -> Cookie<'static> {
        let mut builder = Cookie::build(SESSION_COOKIE, id.to_string())
            .path("/")
            .http_only(true);
        if let Some(ttl) = self.ttl {
            let seconds = i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX);
            builder = builder.max_age(time::Duration::seconds(seconds));
        }
        builder.finish()
    }

    pub fn removal_cookie() -> Cookie<'static> {
        let mut cookie = Cookie::build(SESSION_COOKIE, "").path("/").finish();
        cookie.make_removal();
        cookie
    }

    async fn get_by_id(&self, id: Uuid) -> SessionState {
        let entries = self.entries.read().await;
        match entries.get(&id) {
            Some(entry) if !entry.is_expired(Utc::now()) => entry.state.clone(),
            _ => SessionState::default(),
        }
    }

    fn expiry_from(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let ttl = chrono::Duration::from_std(self.ttl?).ok()?;
        now.checked_add_signed(ttl)
    }
}

/// Drops expired sessions every `period`. Runs for the life of the process.
pub async fn run_sweeper(sessions: web::Data<SessionStore>, period: Duration) {
    let mut interval = tokio::time::interval(period);
    loop {
        interval.tick().await;
        let removed = sessions.purge_expired().await;
        if removed > 0 {
            info!("Removed {} expired sessions", removed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    fn request_with(id: Uuid) -> HttpRequest {
        TestRequest::default()
            .cookie(Cookie::new(SESSION_COOKIE, id.to_string()))
            .to_http_request()
    }

    #[actix_web::test]
    async fn request_without_cookie_is_anonymous() {
        let sessions = SessionStore::new(None);
        let req = TestRequest::default().to_http_request();

        assert_eq!(sessions.get(&req).await, SessionState::default());
    }

    #[actix_web::test]
    async fn garbage_cookie_is_anonymous() {
        let sessions = SessionStore::new(None);
        let req = TestRequest::default()
            .cookie(Cookie::new(SESSION_COOKIE, "not-a-uuid"))
            .to_http_request();

        assert!(!sessions.get(&req).await.logged_in);
    }

    #[actix_web::test]
    async fn set_then_get_round_trips_state() {
        let sessions = SessionStore::new(None);
        let anonymous = TestRequest::default().to_http_request();

        let id = sessions
            .set(&anonymous, SessionState::authenticated("alice"))
            .await;
        let state = sessions.get(&request_with(id)).await;

        assert!(state.logged_in);
        assert_eq!(state.username, "alice");
    }

    #[actix_web::test]
    async fn live_session_keeps_its_id() {
        let sessions = SessionStore::new(None);
        let first = sessions
            .set(&TestRequest::default().to_http_request(), SessionState::authenticated("alice"))
            .await;

        let second = sessions
            .set(&request_with(first), SessionState::authenticated("bob"))
            .await;

        assert_eq!(first, second);
        assert_eq!(sessions.get(&request_with(first)).await.username, "bob");
    }

    #[actix_web::test]
    async fn unknown_cookie_gets_a_fresh_id() {
        let sessions = SessionStore::new(None);
        let stale = Uuid::new_v4();

        let id = sessions
            .set(&request_with(stale), SessionState::authenticated("alice"))
            .await;

        assert_ne!(id, stale);
    }

    #[actix_web::test]
    async fn destroy_is_idempotent() {
        let sessions = SessionStore::new(None);
        let id = sessions
            .set(&TestRequest::default().to_http_request(), SessionState::authenticated("alice"))
            .await;
        let req = request_with(id);

        assert!(sessions.destroy(&req).await);
        assert!(!sessions.destroy(&req).await);
        assert!(!sessions.destroy(&TestRequest::default().to_http_request()).await);
        assert!(!sessions.get(&req).await.logged_in);
    }

    #[actix_web::test]
    async fn expired_sessions_read_as_anonymous_and_are_purged() {
        let sessions = SessionStore::new(Some(Duration::from_millis(1)));
        let id = sessions
            .set(&TestRequest::default().to_http_request(), SessionState::authenticated("alice"))
            .await;

        tokio::time::sleep(Duration::from_millis(20)).await;

        assert!(!sessions.get(&request_with(id)).await.logged_in);
        assert_eq!(sessions.purge_expired().await, 1);
        assert_eq!(sessions.purge_expired().await, 0);
    }

    #[actix_web::test]
    async fn sessions_without_ttl_never_expire() {
        let sessions = SessionStore::new(None);
        sessions
            .set(&TestRequest::default().to_http_request(), SessionState::authenticated("alice"))
            .await;

        assert_eq!(sessions.purge_expired().await, 0);
    }

    #[test]
    fn cookie_max_age_follows_ttl() {
        let id = Uuid::new_v4();

        let unbounded = SessionStore::new(None).cookie(id);
        assert_eq!(unbounded.max_age(), None);
        assert_eq!(unbounded.http_only(), Some(true));

        let bounded = SessionStore::new(Some(Duration::from_secs(600))).cookie(id);
        assert_eq!(bounded.max_age(), Some(time::Duration::seconds(600)));
    }
}
