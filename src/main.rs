use std::io;
use std::time::Duration;

use actix_web::middleware::{from_fn, Logger};
use actix_web::{web, App, HttpServer};
use env_logger::Env;
use log::{error, info};

use neonrpm::auth::sessions::run_sweeper;
use neonrpm::auth::{auth_gate, SessionStore};
use neonrpm::config::Config;
use neonrpm::routes;
use neonrpm::store::SqliteAccountStore;
use neonrpm::templates::Renderer;

const MAX_SWEEP_PERIOD: Duration = Duration::from_secs(60);

#[actix_web::main]
async fn main() -> io::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = Config::from_env().map_err(|e| {
        error!("Invalid configuration: {}", e);
        io::Error::new(io::ErrorKind::InvalidInput, e)
    })?;

    let store = SqliteAccountStore::connect(&config.database_url)
        .await
        .map_err(|e| {
            error!("Failed to open database {}: {}", config.database_url, e);
            io::Error::new(io::ErrorKind::Other, e)
        })?;
    let store = web::Data::new(store);

    let sessions = web::Data::new(SessionStore::new(config.session_ttl));
    match config.session_ttl {
        Some(ttl) => {
            info!("Sessions expire after {}s", ttl.as_secs());
            let period = ttl.min(MAX_SWEEP_PERIOD).max(Duration::from_secs(1));
            actix_web::rt::spawn(run_sweeper(sessions.clone(), period));
        }
        None => info!("Sessions never expire"),
    }

    let renderer = web::Data::new(Renderer::new(config.template_dir.clone()));
    info!("Serving templates from {}", renderer.dir().display());

    info!("NeonRPM server running at http://{}", config.server_address);

    HttpServer::new(move || {
        App::new()
            .app_data(store.clone())
            .app_data(sessions.clone())
            .app_data(renderer.clone())
            .wrap(from_fn(auth_gate))
            .wrap(Logger::default())
            .configure(routes::configure::<SqliteAccountStore>)
    })
    .bind(&config.server_address)?
    .run()
    .await
}
