mod config;
mod db;
mod error;
mod services;
mod state;

use crate::config::AppConfig;
use crate::state::AppState;
use actix_web::{middleware, web, App, HttpServer};
use env_logger::Env;
use log::info;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));
    let config = AppConfig::from_env();

    db::init(&config.db_path).map_err(std::io::Error::other)?;
    info!("Using template database {}", config.db_path.display());

    let state = AppState {
        db_path: config.db_path.clone(),
    };
    let json_limit = config.json_limit;

    info!("Server running at http://{}:{}", config.host, config.port);

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(web::JsonConfig::default().limit(json_limit))
            .app_data(web::Data::new(state.clone()))
            .service(services::templates::configure_routes())
            .service(services::drafts::configure_routes())
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::state::AppState;

    /// Fresh database in a temporary directory; keep the guard alive for the
    /// duration of the test.
    pub fn test_state() -> (tempfile::TempDir, AppState) {
        let dir = tempfile::tempdir().expect("temp dir");
        let db_path = dir.path().join("templates.sqlite");
        crate::db::init(&db_path).expect("schema");
        (dir, AppState { db_path })
    }
}
