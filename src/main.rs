//! # Oracle Relayer
//!
//! HTTP service that relays oracle prices on-chain when a Pub/Sub push
//! delivery asks for it.
//!
//! ## Architecture
//!
//! The service is built using Actix-web and provides:
//! - `POST /` and `POST /api/v1/relay` for Pub/Sub push deliveries
//! - `GET /api/v1/health`
//!
//! ## Usage
//!
//! ```bash
//! NODE_ENV=development GCP_PROJECT_ID=... cargo run
//! ```

use actix_web::{
    middleware::{self, Logger},
    web, App, HttpServer,
};
use color_eyre::{eyre::WrapErr, Result};
use dotenvy::dotenv;
use log::info;

use oracle_relayer::{
    api::routes::{configure_routes, relay},
    bootstrap::initialize_app_state,
    config::ServerConfig,
    logging::setup_logging,
    models::DefaultRelayEngine,
    utils::log_service_info,
};

#[actix_web::main]
async fn main() -> Result<()> {
    // Initialize error reporting with eyre
    color_eyre::install().wrap_err("Failed to initialize error reporting")?;

    dotenv().ok();
    setup_logging();

    let config = ServerConfig::from_env().wrap_err("Failed to load server configuration")?;
    log_service_info(config.network);
    info!("NODE_ENV={}", config.node_env);

    let app_state = initialize_app_state(&config)?;

    info!("Starting server on {}:{}", config.host, config.port);
    HttpServer::new(move || {
        App::new()
            .wrap(middleware::NormalizePath::trim())
            .wrap(middleware::DefaultHeaders::new())
            .wrap(Logger::default())
            .app_data(app_state.clone())
            .configure(relay::init_root::<DefaultRelayEngine>)
            .service(web::scope("/api/v1").configure(configure_routes::<DefaultRelayEngine>))
    })
    .bind((config.host.as_str(), config.port))
    .wrap_err_with(|| format!("Failed to bind server to {}:{}", config.host, config.port))?
    .shutdown_timeout(5)
    .run()
    .await
    .wrap_err("Server runtime error")
}
