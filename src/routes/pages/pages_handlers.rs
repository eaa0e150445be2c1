use actix_web::{web, HttpRequest, HttpResponse, Responder};
use log::info;

use crate::auth::SessionStore;
use crate::error::AppError;
use crate::routes::html;
use crate::store::AccountStore;
use crate::templates::{Page, Renderer, Slot, SlotValue};

pub async fn health() -> impl Responder {
    HttpResponse::Ok().body("ok")
}

pub async fn landing(
    req: HttpRequest,
    sessions: web::Data<SessionStore>,
    renderer: web::Data<Renderer>,
) -> Result<HttpResponse, AppError> {
    let session = sessions.get(&req).await;
    info!("Serving landing page for user: {}", session.username);

    let page = renderer
        .render(Page::Landing, &[(Slot::Username, SlotValue::Text(&session.username))])
        .await?;
    Ok(html(page))
}

// Registered users in registration order
pub async fn account_history<S: AccountStore + 'static>(
    store: web::Data<S>,
    renderer: web::Data<Renderer>,
) -> Result<HttpResponse, AppError> {
    info!("Received request for the user history page");
    let accounts = store.list_accounts().await?;

    let page = renderer
        .render(Page::AccountList, &[(Slot::AccountTable, SlotValue::Accounts(&accounts))])
        .await?;
    Ok(html(page))
}

pub async fn accounts_json<S: AccountStore + 'static>(store: web::Data<S>) -> Result<HttpResponse, AppError> {
    info!("Received request to list accounts");
    let accounts = store.list_accounts().await?;
    Ok(HttpResponse::Ok().json(accounts))
}
