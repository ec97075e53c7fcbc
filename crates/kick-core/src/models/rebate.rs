//! Rebate calculation result
//!
//! The breakdown of a prorated downtime credit: a partial start day, zero or
//! more full days, and a partial end day.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Output of a single rebate computation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RebateResult {
    /// Monthly rate the credit was derived from
    pub monthly_rate: Decimal,

    /// Divisor used for the daily rate
    pub month_length: u32,

    /// monthly_rate / month_length, 3 dp
    pub daily_rate: Decimal,

    /// daily_rate / 24, 3 dp
    pub hourly_rate: Decimal,

    /// Number of whole calendar days credited at the daily rate
    pub full_days: u32,

    /// Dates credited as full days, in calendar order
    pub full_days_list: Vec<NaiveDate>,

    /// Hours credited on the first calendar day, 3 dp
    pub partial_start_hours: Decimal,

    /// Hours credited on the last calendar day, 3 dp
    pub partial_end_hours: Decimal,

    /// 2 dp
    pub rebate_partial_start: Decimal,

    /// 2 dp
    pub rebate_full_days: Decimal,

    /// 2 dp
    pub rebate_partial_end: Decimal,

    /// Sum of the unrounded components, 3 dp
    pub total_rebate: Decimal,

    /// total_rebate truncated toward zero
    pub total_rebate_rounded: i64,

    /// Whole seconds between downtime start and end
    pub downtime_seconds: i64,

    /// Human readable downtime, e.g. "26h 0m 0s"
    pub downtime_duration: String,
}
