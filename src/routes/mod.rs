// src/routes/mod.rs

use actix_web::http::header::{self, ContentType};
use actix_web::{HttpResponse, HttpResponseBuilder};

pub mod login;
pub mod pages;
pub mod register;
pub mod routes;

pub use routes::configure;

pub const LANDING_PATH: &str = "/index.html";

pub(crate) fn html(body: String) -> HttpResponse {
    HttpResponse::Ok().content_type(ContentType::html()).body(body)
}

pub(crate) fn redirect(location: &str) -> HttpResponseBuilder {
    let mut builder = HttpResponse::Found();
    builder.insert_header((header::LOCATION, location));
    builder
}
