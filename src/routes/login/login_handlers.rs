use actix_web::{web, HttpRequest, HttpResponse};
use log::info;

use super::login_models::LoginForm;
use crate::auth::{flows, AuthError, SessionStore, LOGIN_PATH};
use crate::error::AppError;
use crate::models::session::SessionState;
use crate::routes::{html, redirect, LANDING_PATH};
use crate::store::AccountStore;
use crate::templates::{Page, Renderer, Slot, SlotValue};

pub const INVALID_LOGIN_MESSAGE: &str = "Invalid, Please try again.";

pub async fn login_page(renderer: web::Data<Renderer>) -> Result<HttpResponse, AppError> {
    info!("Received request for the login page");
    let page = renderer.render(Page::Login, &[]).await?;
    Ok(html(page))
}

pub async fn login<S: AccountStore + 'static>(
    req: HttpRequest,
    store: web::Data<S>,
    sessions: web::Data<SessionStore>,
    renderer: web::Data<Renderer>,
    form: web::Form<LoginForm>,
) -> Result<HttpResponse, AppError> {
    info!(
        "Received login request for user: {}",
        form.username.as_deref().unwrap_or_default()
    );

    match flows::login(store.get_ref(), form.username.as_deref(), form.password.as_deref()).await {
        Ok(authenticated) => {
            let session_id = sessions
                .set(&req, SessionState::authenticated(authenticated.username))
                .await;
            Ok(redirect(LANDING_PATH).cookie(sessions.cookie(session_id)).finish())
        }
        Err(AuthError::InvalidCredentials) => {
            let page = renderer
                .render(Page::Login, &[(Slot::LoginError, SlotValue::Text(INVALID_LOGIN_MESSAGE))])
                .await?;
            Ok(html(page))
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn logout(req: HttpRequest, sessions: web::Data<SessionStore>) -> HttpResponse {
    info!("Received logout request");
    flows::logout(&sessions, &req).await;

    redirect(LOGIN_PATH).cookie(SessionStore::removal_cookie()).finish()
}
