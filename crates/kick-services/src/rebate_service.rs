//! Rebate service
//!
//! Looks up the client's plan rate, checks the calculator's preconditions,
//! pins operator-entered timestamps to the configured timezone, and prices
//! the outage.

use crate::constants::MAX_MONTHLY_RATE;
use crate::rebate::RebateCalculator;
use crate::timezone::localize;
use chrono::{DateTime, NaiveDateTime};
use chrono_tz::Tz;
use kick_core::{
    models::{Client, RebateResult},
    traits::ClientRepository,
    AppError, AppResult, RebateConfig,
};
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// A rebate priced for a specific client
#[derive(Debug, Clone)]
pub struct RebateQuote {
    pub client: Client,
    pub downtime_start: DateTime<Tz>,
    pub downtime_end: DateTime<Tz>,
    pub result: RebateResult,
    /// False when the outage did not exceed the configured minimum
    pub eligible: bool,
    /// Amount to credit: `result.total_rebate` when eligible, zero otherwise
    pub credited_amount: Decimal,
}

/// A rebate priced from an explicit monthly rate, without a client lookup
#[derive(Debug, Clone)]
pub struct RebatePreview {
    pub downtime_start: DateTime<Tz>,
    pub downtime_end: DateTime<Tz>,
    pub result: RebateResult,
    pub eligible: bool,
    pub credited_amount: Decimal,
}

/// Caller-side wrapper around [`RebateCalculator`]
pub struct RebateService {
    clients: Arc<dyn ClientRepository>,
    calculator: RebateCalculator,
    timezone: Tz,
    min_downtime_secs: i64,
    max_downtime_days: i64,
}

impl RebateService {
    /// Create a rebate service from the `[rebate]` config section
    pub fn new(clients: Arc<dyn ClientRepository>, config: &RebateConfig) -> AppResult<Self> {
        config.validate()?;

        Ok(Self {
            clients,
            calculator: RebateCalculator::new(config.month_length),
            timezone: config.tz()?,
            min_downtime_secs: config.min_downtime_secs,
            max_downtime_days: i64::from(config.max_downtime_days),
        })
    }

    /// Look up a client by account number
    #[instrument(skip(self))]
    pub async fn find_client(&self, account_number: &str) -> AppResult<Client> {
        let normalized = Client::normalize_account_number(account_number);

        if normalized.is_empty() {
            return Err(AppError::MissingField("account_number".to_string()));
        }

        let client = self.clients.find_by_account_number(&normalized).await?;

        client.ok_or_else(|| {
            warn!(account_number = %normalized, "Account not found");
            AppError::AccountNotFound(normalized)
        })
    }

    /// Price an outage for the client identified by `account_number`
    #[instrument(skip(self))]
    pub async fn quote(
        &self,
        account_number: &str,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> AppResult<RebateQuote> {
        let client = self.find_client(account_number).await?;

        if !client.has_plan_rate() {
            warn!(
                account_number = %client.account_number,
                plan_rate = %client.plan_rate,
                "Client has no usable plan rate"
            );
            return Err(AppError::RateNotSet(client.account_name));
        }

        let (downtime_start, downtime_end) = self.localize_interval(start, end)?;

        let result = self
            .calculator
            .compute(client.plan_rate, &downtime_start, &downtime_end);
        let (eligible, credited_amount) = self.credit(&result);

        info!(
            account_number = %client.account_number,
            downtime_seconds = result.downtime_seconds,
            total_rebate = %result.total_rebate,
            eligible,
            "Rebate calculated"
        );

        Ok(RebateQuote {
            client,
            downtime_start,
            downtime_end,
            result,
            eligible,
            credited_amount,
        })
    }

    /// Price an outage from a monthly rate the caller already knows
    #[instrument(skip(self))]
    pub fn calculate(
        &self,
        monthly_rate: Decimal,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> AppResult<RebatePreview> {
        if monthly_rate <= Decimal::ZERO {
            return Err(AppError::Validation(
                "monthly_rate must be greater than zero".to_string(),
            ));
        }

        if monthly_rate > MAX_MONTHLY_RATE {
            return Err(AppError::Validation(format!(
                "monthly_rate cannot exceed {}",
                MAX_MONTHLY_RATE
            )));
        }

        let (downtime_start, downtime_end) = self.localize_interval(start, end)?;

        let result = self
            .calculator
            .compute(monthly_rate, &downtime_start, &downtime_end);
        let (eligible, credited_amount) = self.credit(&result);

        debug!(total_rebate = %result.total_rebate, "Rebate preview calculated");

        Ok(RebatePreview {
            downtime_start,
            downtime_end,
            result,
            eligible,
            credited_amount,
        })
    }

    fn localize_interval(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> AppResult<(DateTime<Tz>, DateTime<Tz>)> {
        let downtime_start = localize(self.timezone, start)?;
        let downtime_end = localize(self.timezone, end)?;

        let days = downtime_end
            .signed_duration_since(&downtime_start)
            .num_days()
            .abs();
        if days > self.max_downtime_days {
            return Err(AppError::InvalidInput(format!(
                "Downtime of {} days exceeds the {} day limit",
                days, self.max_downtime_days
            )));
        }

        Ok((downtime_start, downtime_end))
    }

    fn credit(&self, result: &RebateResult) -> (bool, Decimal) {
        if self.min_downtime_secs > 0 && result.downtime_seconds <= self.min_downtime_secs {
            debug!(
                downtime_seconds = result.downtime_seconds,
                min_downtime_secs = self.min_downtime_secs,
                "Downtime below rebate threshold"
            );
            return (false, Decimal::ZERO);
        }
        (true, result.total_rebate)
    }
}
