use actix_web::{web, HttpResponse};
use log::info;

use super::register_models::RegisterForm;
use crate::auth::{flows, AuthError, LOGIN_PATH};
use crate::error::AppError;
use crate::routes::{html, redirect};
use crate::store::AccountStore;
use crate::templates::{Page, Renderer, Slot, SlotValue};

pub const USERNAME_TAKEN_MESSAGE: &str = "Username is taken. Please try a different one.";

pub async fn register_page(renderer: web::Data<Renderer>) -> Result<HttpResponse, AppError> {
    info!("Received request for the registration page");
    let page = renderer.render(Page::Register, &[]).await?;
    Ok(html(page))
}

pub async fn register<S: AccountStore + 'static>(
    store: web::Data<S>,
    renderer: web::Data<Renderer>,
    form: web::Form<RegisterForm>,
) -> Result<HttpResponse, AppError> {
    info!(
        "Received request to register user: {}",
        form.username.as_deref().unwrap_or_default()
    );

    match flows::register(store.get_ref(), form.username.as_deref(), form.password.as_deref()).await {
        Ok(_) => Ok(redirect(LOGIN_PATH).finish()),
        Err(AuthError::UsernameTaken(_)) => {
            let page = renderer
                .render(Page::Register, &[(Slot::RegisterError, SlotValue::Text(USERNAME_TAKEN_MESSAGE))])
                .await?;
            Ok(html(page))
        }
        Err(e) => Err(e.into()),
    }
}
