use actix_web::middleware::NormalizePath;
use actix_web::web::Data;
use actix_web::{App, HttpServer};

mod api;
mod config;
mod db;
mod docs;
mod error;
mod model;
mod pages;
mod report;
mod routes;
mod store;

use config::Config;
use db::init_db;

use crate::docs::ApiDoc;
use tracing::info;
use tracing_appender::rolling;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    // Rolling daily log
    let file_appender = rolling::daily(&config.log_dir, "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_target(false)
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .init();

    info!(addr = %config.server_addr, "Server starting...");

    let pool = init_db(&config.database_url, config.db_max_connections).await?;

    let server_addr = config.server_addr.clone();
    let api_prefix = config.api_prefix.clone();

    HttpServer::new(move || {
        let api_prefix = api_prefix.clone();
        App::new()
            .wrap(actix_web::middleware::Logger::default())
            .wrap(NormalizePath::trim())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}") // wildcard so the UI's JS/CSS assets resolve
                    .url("/api-doc/openapi.json", ApiDoc::openapi()),
            )
            .app_data(Data::new(pool.clone()))
            .app_data(Data::new(config.clone()))
            .configure(move |cfg| routes::configure_api(cfg, &api_prefix))
            .configure(routes::configure_pages)
    })
    .workers(1)
    .bind(server_addr)?
    .run()
    .await?;

    info!("Server stopped");
    Ok(())
}
