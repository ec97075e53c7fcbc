//! API layer for the KICK rebate service
//!
//! HTTP API handlers for client lookup and downtime rebate calculation.

#![forbid(unsafe_code)]
#![warn(clippy::all, missing_docs)]

pub mod dto;
pub mod handlers;

use actix_web::{web, HttpResponse};
use kick_core::AppError;

// Re-export DTOs (common types)
pub use dto::ApiResponse;

// Re-export handler configuration functions
pub use handlers::{configure_clients, configure_rebates, health_check};

/// Mount every `/api/v1` route
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .route("/health", web::get().to(health_check))
            .configure(configure_rebates)
            .configure(configure_clients),
    );
}

/// JSON extractor config that reports malformed bodies as `invalid_input`
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(64 * 1024)
        .error_handler(|err, _req| {
            let app_err = AppError::InvalidInput(err.to_string());
            let response = HttpResponse::from_error(app_err);
            actix_web::error::InternalError::from_response(err, response).into()
        })
}
