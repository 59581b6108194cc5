//! Product API server entry point.

use actix_web::middleware::{Logger, NormalizePath, TrailingSlash};
use actix_web::web::Data;
use actix_web::{App, HttpServer};
use log::{error, info, warn};
use product_api::{configure_routes, AppConfig, AppState};
use product_core::db::{open_db, reset_db};
use std::io;

#[actix_web::main]
async fn main() -> io::Result<()> {
    let config = AppConfig::from_env().map_err(|err| io::Error::other(err.to_string()))?;

    product_core::init_logging(&config.log_level, config.log_dir.as_deref())
        .map_err(io::Error::other)?;

    // Migrate (and seed) once before serving so requests never race on it.
    let bootstrap = if config.reset_db {
        warn!(
            "event=server_start module=api status=reset_db path={}",
            config.db_path.display()
        );
        reset_db(&config.db_path)
    } else {
        open_db(&config.db_path)
    };
    if let Err(err) = bootstrap {
        error!(
            "event=server_start module=api status=error error_code=db_bootstrap_failed error={}",
            err
        );
        return Err(io::Error::other(err.to_string()));
    }

    let state = AppState::new(config.db_path.clone());
    let (host, port) = config.bind_address();
    info!(
        "event=server_start module=api status=ok host={} port={} db_path={}",
        host,
        port,
        state.db_path().display()
    );

    HttpServer::new(move || {
        App::new()
            .wrap(NormalizePath::new(TrailingSlash::Trim))
            .wrap(Logger::default())
            .app_data(Data::new(state.clone()))
            .configure(configure_routes)
    })
    .bind((host, port))?
    .run()
    .await
}
