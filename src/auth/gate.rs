use actix_web::body::{EitherBody, MessageBody};
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::http::header;
use actix_web::middleware::Next;
use actix_web::{web, Error, HttpResponse};
use log::{error, info};

use super::sessions::SessionStore;
use crate::models::session::SessionState;

pub const LOGIN_PATH: &str = "/login";

/// Paths served without a session. Matched as exact strings.
pub const ALLOW_LIST: [&str; 5] = ["/login", "/login.html", "/register", "/register.html", "/health"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    Allow,
    Deny,
}

pub fn decide(path: &str, session: &SessionState) -> GateDecision {
    if session.logged_in || ALLOW_LIST.contains(&path) {
        GateDecision::Allow
    } else {
        GateDecision::Deny
    }
}

/// Middleware placed in front of every route. Denied requests never reach a
/// handler and are redirected to the login page.
pub async fn auth_gate<B: MessageBody>(
    req: ServiceRequest,
    next: Next<B>,
) -> Result<ServiceResponse<EitherBody<B>>, Error> {
    let session = match req.app_data::<web::Data<SessionStore>>() {
        Some(sessions) => sessions.get(req.request()).await,
        None => {
            error!("Session store is not registered, treating request as anonymous");
            SessionState::default()
        }
    };

    match decide(req.path(), &session) {
        GateDecision::Allow => next.call(req).await.map(ServiceResponse::map_into_left_body),
        GateDecision::Deny => {
            info!("Redirecting unauthenticated request for {}", req.path());
            let response = HttpResponse::Found()
                .insert_header((header::LOCATION, LOGIN_PATH))
                .finish();
            Ok(req.into_response(response).map_into_right_body())
        }
    }
}
