//! Health check handler

use actix_web::HttpResponse;

/// Health check endpoint
///
/// GET /api/v1/health
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "kick-rebate",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
