//! Rebate handlers
//!
//! HTTP handlers for the downtime rebate calculator.

use crate::dto::rebate::{RebateCalculateRequest, RebatePreviewRequest, RebateResponse};
use crate::dto::ApiResponse;
use actix_web::{web, HttpResponse};
use kick_core::AppError;
use kick_services::RebateService;
use tracing::{debug, info, instrument, warn};
use validator::Validate;

/// Calculate the rebate owed to a client for an outage
///
/// POST /api/v1/rebates/calculate
#[instrument(skip(service, req), fields(account_number = %req.account_number))]
pub async fn calculate_rebate(
    service: web::Data<RebateService>,
    req: web::Json<RebateCalculateRequest>,
) -> Result<HttpResponse, AppError> {
    req.validate().map_err(|e| {
        warn!("Rebate request validation failed: {}", e);
        AppError::Validation(e.to_string())
    })?;

    debug!(start = %req.start_time, end = %req.end_time, "Calculating rebate");

    let quote = service
        .quote(&req.account_number, req.start_time, req.end_time)
        .await?;

    info!(
        account_number = %quote.client.account_number,
        total_rebate = %quote.result.total_rebate,
        "Rebate quoted"
    );

    let response = RebateResponse::from(&quote);
    let message = if quote.eligible {
        format!("Rebate of {} for {}", response.rebate_amount, quote.client.account_name)
    } else {
        format!(
            "Downtime of {} does not qualify for a rebate",
            quote.result.downtime_duration
        )
    };

    Ok(HttpResponse::Ok().json(ApiResponse::with_message(response, message)))
}

/// Price an outage from an explicit monthly rate
///
/// POST /api/v1/rebates/preview
#[instrument(skip(service, req))]
pub async fn preview_rebate(
    service: web::Data<RebateService>,
    req: web::Json<RebatePreviewRequest>,
) -> Result<HttpResponse, AppError> {
    req.validate().map_err(|e| {
        warn!("Rebate preview validation failed: {}", e);
        AppError::Validation(e.to_string())
    })?;

    let preview = service.calculate(req.monthly_rate, req.start_time, req.end_time)?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(RebateResponse::from(&preview))))
}

/// Configure rebate routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/rebates")
            .route("/calculate", web::post().to(calculate_rebate))
            .route("/preview", web::post().to(preview_rebate)),
    );
}
