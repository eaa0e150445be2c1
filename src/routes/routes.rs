use actix_web::web;

use crate::store::AccountStore;

use super::login::login_handlers;
use super::pages::pages_handlers;
use super::register::register_handlers;

pub fn login_configure<S: AccountStore + 'static>(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/login")
            .route(web::get().to(login_handlers::login_page))
            .route(web::post().to(login_handlers::login::<S>)),
    )
    .route("/login.html", web::get().to(login_handlers::login_page))
    .route("/logout", web::get().to(login_handlers::logout));
}

pub fn register_configure<S: AccountStore + 'static>(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/register")
            .route(web::get().to(register_handlers::register_page))
            .route(web::post().to(register_handlers::register::<S>)),
    )
    .route("/register.html", web::get().to(register_handlers::register_page));
}

pub fn pages_configure<S: AccountStore + 'static>(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(pages_handlers::health))
        .route("/", web::get().to(pages_handlers::landing))
        .route("/index.html", web::get().to(pages_handlers::landing))
        .route("/user_history.html", web::get().to(pages_handlers::account_history::<S>))
        .route("/accounts", web::get().to(pages_handlers::accounts_json::<S>));
}

pub fn configure<S: AccountStore + 'static>(cfg: &mut web::ServiceConfig) {
    cfg.configure(login_configure::<S>)
        .configure(register_configure::<S>)
        .configure(pages_configure::<S>);
}
