//! Rebate DTOs
//!
//! Request and response types for the downtime rebate calculator.

use super::common::{deserialize_local_datetime, format_3dp, format_money};
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone};
use kick_core::models::{Client, RebateResult};
use kick_services::{constants::MAX_MONTHLY_RATE, RebatePreview, RebateQuote};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use validator::{Validate, ValidationError};

/// Rebate calculation request for an existing client
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RebateCalculateRequest {
    /// Client account number
    #[validate(length(min = 1, max = 100, message = "Account number is required"))]
    pub account_number: String,

    /// Downtime start, local time of the helpdesk timezone
    #[serde(deserialize_with = "deserialize_local_datetime")]
    pub start_time: NaiveDateTime,

    /// Downtime end, local time of the helpdesk timezone
    #[serde(deserialize_with = "deserialize_local_datetime")]
    pub end_time: NaiveDateTime,
}

/// Rebate preview request with an explicit monthly rate
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RebatePreviewRequest {
    /// Monthly plan rate
    #[validate(custom(function = "validate_positive_rate"))]
    pub monthly_rate: Decimal,

    /// Downtime start, local time of the helpdesk timezone
    #[serde(deserialize_with = "deserialize_local_datetime")]
    pub start_time: NaiveDateTime,

    /// Downtime end, local time of the helpdesk timezone
    #[serde(deserialize_with = "deserialize_local_datetime")]
    pub end_time: NaiveDateTime,
}

fn validate_positive_rate(rate: &Decimal) -> Result<(), ValidationError> {
    if *rate <= Decimal::ZERO {
        let mut err = ValidationError::new("positive_rate");
        err.message = Some("Monthly rate must be greater than zero".into());
        return Err(err);
    }
    if *rate > MAX_MONTHLY_RATE {
        let mut err = ValidationError::new("max_rate");
        err.message = Some(format!("Monthly rate cannot exceed {}", MAX_MONTHLY_RATE).into());
        return Err(err);
    }
    Ok(())
}

/// Client summary
#[derive(Debug, Clone, Serialize)]
pub struct ClientResponse {
    /// Client ID
    pub id: i32,
    /// Account number
    pub account_number: String,
    /// Subscriber name
    pub account_name: String,
    /// Account status
    pub status: String,
    /// Monthly plan rate, 2 dp
    pub plan_rate: String,
    /// Whether a usable plan rate is on file
    pub has_plan_rate: bool,
}

impl From<Client> for ClientResponse {
    fn from(client: Client) -> Self {
        Self {
            id: client.id,
            has_plan_rate: client.has_plan_rate(),
            plan_rate: format_money(client.plan_rate),
            status: client.status.to_string(),
            account_number: client.account_number,
            account_name: client.account_name,
        }
    }
}

/// Rebate breakdown as shown to operators
#[derive(Debug, Clone, Serialize)]
pub struct RebateResponse {
    /// Account number (absent for previews)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_number: Option<String>,
    /// Subscriber name (absent for previews)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_name: Option<String>,
    /// Monthly plan rate, 2 dp
    pub plan_rate: String,
    /// Downtime start, RFC 3339 with offset
    pub downtime_start: String,
    /// Downtime end, RFC 3339 with offset
    pub downtime_end: String,
    /// Downtime as "{h}h {m}m {s}s"
    pub downtime_duration: String,
    /// Downtime in whole seconds
    pub downtime_seconds: i64,
    /// Daily-rate divisor
    pub month_length: u32,
    /// Daily rate, 3 dp
    pub daily_rate: String,
    /// Hourly rate, 3 dp
    pub hourly_rate: String,
    /// Number of full days credited
    pub full_days: u32,
    /// Full days as ISO dates
    pub full_days_list: Vec<NaiveDate>,
    /// Full days for display, e.g. "Mar 2, 2025; Mar 3, 2025"
    pub full_days_display: String,
    /// Partial hours on the first day, 3 dp
    pub partial_start_hours: String,
    /// Partial hours on the last day, 3 dp
    pub partial_end_hours: String,
    /// Credit for the first day, 2 dp
    pub rebate_partial_start: String,
    /// Credit for the full days, 2 dp
    pub rebate_full_days: String,
    /// Credit for the last day, 2 dp
    pub rebate_partial_end: String,
    /// Total credit, 3 dp
    pub total_rebate: String,
    /// Total credit truncated to a whole amount
    pub total_rebate_rounded: i64,
    /// Whether the outage qualifies for a credit
    pub eligible: bool,
    /// Amount to credit, 2 dp
    pub rebate_amount: String,
}

impl RebateResponse {
    fn build<Tz>(
        client: Option<&Client>,
        start: &DateTime<Tz>,
        end: &DateTime<Tz>,
        result: &RebateResult,
        eligible: bool,
        credited_amount: Decimal,
    ) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        Self {
            account_number: client.map(|c| c.account_number.clone()),
            account_name: client.map(|c| c.account_name.clone()),
            plan_rate: format_money(result.monthly_rate),
            downtime_start: start.to_rfc3339(),
            downtime_end: end.to_rfc3339(),
            downtime_duration: result.downtime_duration.clone(),
            downtime_seconds: result.downtime_seconds,
            month_length: result.month_length,
            daily_rate: format_3dp(result.daily_rate),
            hourly_rate: format_3dp(result.hourly_rate),
            full_days: result.full_days,
            full_days_list: result.full_days_list.clone(),
            full_days_display: format_full_days(&result.full_days_list),
            partial_start_hours: format_3dp(result.partial_start_hours),
            partial_end_hours: format_3dp(result.partial_end_hours),
            rebate_partial_start: format_money(result.rebate_partial_start),
            rebate_full_days: format_money(result.rebate_full_days),
            rebate_partial_end: format_money(result.rebate_partial_end),
            total_rebate: format_3dp(result.total_rebate),
            total_rebate_rounded: result.total_rebate_rounded,
            eligible,
            rebate_amount: format_money(credited_amount),
        }
    }
}

impl From<&RebateQuote> for RebateResponse {
    fn from(quote: &RebateQuote) -> Self {
        Self::build(
            Some(&quote.client),
            &quote.downtime_start,
            &quote.downtime_end,
            &quote.result,
            quote.eligible,
            quote.credited_amount,
        )
    }
}

impl From<&RebatePreview> for RebateResponse {
    fn from(preview: &RebatePreview) -> Self {
        Self::build(
            None,
            &preview.downtime_start,
            &preview.downtime_end,
            &preview.result,
            preview.eligible,
            preview.credited_amount,
        )
    }
}

/// Render full days as a readable list
pub fn format_full_days(days: &[NaiveDate]) -> String {
    if days.is_empty() {
        return "None".to_string();
    }

    days.iter()
        .map(|d| d.format("%b %-d, %Y").to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
