//! Client handlers
//!
//! Read-only client lookup used to prefill the rebate calculator.

use crate::dto::rebate::ClientResponse;
use crate::dto::ApiResponse;
use actix_web::{web, HttpResponse};
use kick_core::AppError;
use kick_services::RebateService;
use tracing::{debug, instrument};

/// Get a client by account number
///
/// GET /api/v1/clients/{account_number}
#[instrument(skip(service))]
pub async fn get_client(
    service: web::Data<RebateService>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let account_number = path.into_inner();
    debug!(account_number = %account_number, "Getting client");

    let client = service.find_client(&account_number).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(ClientResponse::from(client))))
}

/// Configure client routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/clients").route("/{account_number}", web::get().to(get_client)));
}
