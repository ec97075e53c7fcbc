//! KICK Rebate Server
//!
//! Serves the helpdesk's downtime rebate calculator and client-rate lookup.

use actix_cors::Cors;
use actix_web::{http::header, middleware, web, App, HttpResponse, HttpServer};
use kick_api::{configure_routes, json_config};
use kick_core::AppConfig;
use kick_db::{create_pool_from_config, run_migrations, PgClientRepository};
use kick_services::RebateService;
use std::env;
use std::io;
use std::sync::Arc;
use tracing::{error, info};
use tracing_actix_web::TracingLogger;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize tracing/logging
fn init_tracing() {
    let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "kick_rebate={},kick_api={},kick_services={},kick_db={},actix_web=info,sqlx=warn",
            log_level, log_level, log_level, log_level
        ))
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true),
        )
        .init();
}

fn startup_error(context: &str, err: impl std::fmt::Display) -> io::Error {
    error!("{}: {}", context, err);
    io::Error::new(io::ErrorKind::Other, format!("{}: {}", context, err))
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    init_tracing();

    info!("Starting KICK rebate server v{}", env!("CARGO_PKG_VERSION"));

    let config = AppConfig::load().map_err(|e| startup_error("Invalid configuration", e))?;

    info!(
        timezone = %config.rebate.timezone,
        month_length = config.rebate.month_length,
        min_downtime_secs = config.rebate.min_downtime_secs,
        "Rebate settings loaded"
    );

    info!("Connecting to database...");
    let pool = create_pool_from_config(&config.database)
        .await
        .map_err(|e| startup_error("Failed to create database pool", e))?;

    run_migrations(&pool)
        .await
        .map_err(|e| startup_error("Failed to apply migrations", e))?;

    let clients = Arc::new(PgClientRepository::new(pool));
    let rebate_service = web::Data::new(
        RebateService::new(clients, &config.rebate)
            .map_err(|e| startup_error("Invalid rebate configuration", e))?,
    );

    let bind_addr = config.server_addr();
    let workers = config.server.workers;
    let cors_origins = config.server.cors_origins.clone();

    info!(
        "Starting HTTP server on {} with {} workers",
        bind_addr, workers
    );

    HttpServer::new(move || {
        let cors_origins_inner = cors_origins.clone();
        let cors = Cors::default()
            .allowed_origin_fn(move |origin, _req_head| {
                let origins: Vec<&str> = cors_origins_inner.split(',').collect();
                if let Ok(origin_str) = origin.to_str() {
                    origins.iter().any(|o| o.trim() == origin_str)
                } else {
                    false
                }
            })
            .allowed_methods(vec!["GET", "POST", "OPTIONS"])
            .allowed_headers(vec![header::ACCEPT, header::CONTENT_TYPE])
            .max_age(3600);

        App::new()
            .app_data(rebate_service.clone())
            .app_data(json_config())
            .wrap(cors)
            .wrap(TracingLogger::default())
            .wrap(middleware::NormalizePath::trim())
            .configure(configure_routes)
            // Root redirect to health
            .route(
                "/",
                web::get().to(|| async {
                    HttpResponse::Found()
                        .append_header(("Location", "/api/v1/health"))
                        .finish()
                }),
            )
    })
    .workers(workers)
    .bind(&bind_addr)?
    .run()
    .await
}
