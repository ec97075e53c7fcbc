//! Downtime rebate proration
//!
//! Splits a downtime interval into a partial start day, whole middle days,
//! and a partial end day, and prices each piece from the monthly plan rate.
//!
//! Rates are rounded before they are multiplied: `daily_rate` and
//! `hourly_rate` are kept at 3 dp, partial hours at 3 dp, the displayed
//! sub-totals at 2 dp, and the total at 3 dp. Changing the order of these
//! roundings changes cent-level results.
//!
//! Products and sums saturate at `Decimal::MAX` instead of panicking, and
//! `total_rebate_rounded` saturates at the `i64` bounds. Callers bound the
//! rate and interval so neither limit is reached in practice.

use crate::duration::format_duration;
use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Timelike};
use kick_core::models::RebateResult;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::constants::DEFAULT_MONTH_LENGTH;

const HOURS_PER_DAY: Decimal = dec!(24);
const MILLIS_PER_DAY: i64 = 86_400_000;
const MILLIS_PER_HOUR: Decimal = dec!(3600000);

/// Prorates a monthly rate over a downtime interval
///
/// The calculator is total: reversed intervals are swapped and a zero-length
/// interval yields a zero credit. Timestamps must share a timezone; day
/// boundaries are taken from their local wall clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RebateCalculator {
    month_length: u32,
}

impl Default for RebateCalculator {
    fn default() -> Self {
        Self {
            month_length: DEFAULT_MONTH_LENGTH,
        }
    }
}

impl RebateCalculator {
    /// Create a calculator with a custom daily-rate divisor
    ///
    /// A `month_length` of zero falls back to the default of 30.
    pub fn new(month_length: u32) -> Self {
        if month_length == 0 {
            return Self::default();
        }
        Self { month_length }
    }

    pub fn month_length(&self) -> u32 {
        self.month_length
    }

    /// monthly_rate / month_length, 3 dp
    pub fn daily_rate(&self, monthly_rate: Decimal) -> Decimal {
        (monthly_rate / Decimal::from(self.month_length)).round_dp(3)
    }

    /// daily_rate / 24, 3 dp
    pub fn hourly_rate(&self, monthly_rate: Decimal) -> Decimal {
        (self.daily_rate(monthly_rate) / HOURS_PER_DAY).round_dp(3)
    }

    /// Compute the rebate owed for `downtime_start..downtime_end`
    pub fn compute<Tz: TimeZone>(
        &self,
        monthly_rate: Decimal,
        downtime_start: &DateTime<Tz>,
        downtime_end: &DateTime<Tz>,
    ) -> RebateResult {
        let (start, end) = if downtime_end < downtime_start {
            (downtime_end, downtime_start)
        } else {
            (downtime_start, downtime_end)
        };

        let daily_rate = self.daily_rate(monthly_rate);
        let hourly_rate = self.hourly_rate(monthly_rate);

        let elapsed = end.clone() - start.clone();
        let downtime_seconds = elapsed.num_seconds();

        let start_date = start.date_naive();
        let end_date = end.date_naive();

        let mut result = RebateResult {
            monthly_rate,
            month_length: self.month_length,
            daily_rate,
            hourly_rate,
            full_days: 0,
            full_days_list: Vec::new(),
            partial_start_hours: Decimal::ZERO,
            partial_end_hours: Decimal::ZERO,
            rebate_partial_start: Decimal::ZERO,
            rebate_full_days: Decimal::ZERO,
            rebate_partial_end: Decimal::ZERO,
            total_rebate: Decimal::ZERO,
            total_rebate_rounded: 0,
            downtime_seconds,
            downtime_duration: format_duration(downtime_seconds),
        };

        if start_date == end_date {
            let hours = millis_to_hours(elapsed.num_milliseconds());
            let rebate = hours.saturating_mul(hourly_rate);

            result.partial_start_hours = hours;
            result.rebate_partial_start = rebate.round_dp(2);
            result.total_rebate = rebate.round_dp(3);
            result.total_rebate_rounded = truncate(result.total_rebate);
            return result;
        }

        let start_of_day = millis_since_midnight(start.time());
        let mut partial_start_hours = millis_to_hours(MILLIS_PER_DAY - start_of_day);
        let mut partial_end_hours = millis_to_hours(millis_since_midnight(end.time()));

        let mut full_days_list = days_between(start_date, end_date);

        if partial_start_hours >= HOURS_PER_DAY {
            partial_start_hours = Decimal::ZERO;
            full_days_list.insert(0, start_date);
        }

        if partial_end_hours >= HOURS_PER_DAY {
            partial_end_hours = Decimal::ZERO;
            full_days_list.push(end_date);
        }

        let full_days = full_days_list.len() as u32;

        let rebate_full_days = Decimal::from(full_days).saturating_mul(daily_rate);
        let rebate_partial_start = partial_start_hours.saturating_mul(hourly_rate);
        let rebate_partial_end = partial_end_hours.saturating_mul(hourly_rate);
        let total = rebate_full_days
            .saturating_add(rebate_partial_start)
            .saturating_add(rebate_partial_end)
            .round_dp(3);

        result.full_days = full_days;
        result.full_days_list = full_days_list;
        result.partial_start_hours = partial_start_hours;
        result.partial_end_hours = partial_end_hours;
        result.rebate_partial_start = rebate_partial_start.round_dp(2);
        result.rebate_full_days = rebate_full_days.round_dp(2);
        result.rebate_partial_end = rebate_partial_end.round_dp(2);
        result.total_rebate = total;
        result.total_rebate_rounded = truncate(total);

        result
    }
}

/// Compute with the default 30-day month
pub fn compute<Tz: TimeZone>(
    monthly_rate: Decimal,
    downtime_start: &DateTime<Tz>,
    downtime_end: &DateTime<Tz>,
) -> RebateResult {
    RebateCalculator::default().compute(monthly_rate, downtime_start, downtime_end)
}

/// Calendar dates strictly between `start` and `end`
fn days_between(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    start
        .iter_days()
        .skip(1)
        .take_while(|day| *day < end)
        .collect()
}

fn millis_since_midnight(time: NaiveTime) -> i64 {
    // leap-second nanos (>= 1e9) are clamped into the last second of the day
    let sub_millis = i64::from(time.nanosecond().min(999_999_999) / 1_000_000);
    i64::from(time.num_seconds_from_midnight()) * 1000 + sub_millis
}

fn millis_to_hours(millis: i64) -> Decimal {
    (Decimal::from(millis) / MILLIS_PER_HOUR).round_dp(3)
}

fn truncate(amount: Decimal) -> i64 {
    let whole = amount.trunc();
    whole.to_i64().unwrap_or(if whole.is_sign_negative() {
        i64::MIN
    } else {
        i64::MAX
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};
    use chrono_tz::America::New_York;
    use chrono_tz::Asia::Manila;
    use chrono_tz::Tz;

    fn pht(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Tz> {
        Manila.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_rate_derivation() {
        let calc = RebateCalculator::default();
        assert_eq!(calc.daily_rate(dec!(3000)), dec!(100.000));
        assert_eq!(calc.hourly_rate(dec!(3000)), dec!(4.167));

        // 1499 / 30 = 49.9666.. -> 49.967; 49.967 / 24 = 2.08195.. -> 2.082
        assert_eq!(calc.daily_rate(dec!(1499)), dec!(49.967));
        assert_eq!(calc.hourly_rate(dec!(1499)), dec!(2.082));
    }

    #[test]
    fn test_zero_length_interval() {
        let at = pht(2025, 3, 1, 14, 30);
        let result = compute(dec!(3000), &at, &at);

        assert_eq!(result.total_rebate, Decimal::ZERO);
        assert_eq!(result.total_rebate_rounded, 0);
        assert_eq!(result.full_days, 0);
        assert_eq!(result.downtime_seconds, 0);
        assert_eq!(result.downtime_duration, "0h 0m 0s");
    }

    #[test]
    fn test_same_day_two_hours() {
        let result = compute(dec!(3000), &pht(2025, 3, 1, 9, 0), &pht(2025, 3, 1, 11, 0));

        assert_eq!(result.daily_rate, dec!(100.000));
        assert_eq!(result.hourly_rate, dec!(4.167));
        assert_eq!(result.partial_start_hours, dec!(2.000));
        assert_eq!(result.partial_end_hours, Decimal::ZERO);
        assert_eq!(result.rebate_partial_start, dec!(8.33));
        assert_eq!(result.rebate_full_days, Decimal::ZERO);
        assert_eq!(result.rebate_partial_end, Decimal::ZERO);
        assert_eq!(result.total_rebate, dec!(8.334));
        assert_eq!(result.total_rebate_rounded, 8);
        assert!(result.full_days_list.is_empty());
        assert_eq!(result.downtime_duration, "2h 0m 0s");
    }

    #[test]
    fn test_reversed_interval_is_swapped() {
        let start = pht(2025, 3, 1, 22, 0);
        let end = pht(2025, 3, 3, 2, 0);

        let forward = compute(dec!(3000), &start, &end);
        let backward = compute(dec!(3000), &end, &start);

        assert_eq!(forward, backward);
        assert!(backward.downtime_seconds > 0);
    }

    #[test]
    fn test_reversed_same_day_is_swapped() {
        let start = pht(2025, 3, 1, 9, 15);
        let end = pht(2025, 3, 1, 13, 45);

        assert_eq!(
            compute(dec!(1499), &start, &end),
            compute(dec!(1499), &end, &start)
        );
    }

    #[test]
    fn test_multi_day_spanning_three_dates() {
        let result = compute(dec!(3000), &pht(2025, 3, 1, 22, 0), &pht(2025, 3, 3, 2, 0));

        assert_eq!(result.full_days, 1);
        assert_eq!(result.full_days_list, vec![date(2025, 3, 2)]);
        assert_eq!(result.partial_start_hours, dec!(2.000));
        assert_eq!(result.partial_end_hours, dec!(2.000));
        assert_eq!(result.rebate_full_days, dec!(100.00));
        assert_eq!(result.rebate_partial_start, dec!(8.33));
        assert_eq!(result.rebate_partial_end, dec!(8.33));
        // 100 + 8.334 + 8.334
        assert_eq!(result.total_rebate, dec!(116.668));
        assert_eq!(result.total_rebate_rounded, 116);
        assert_eq!(result.downtime_seconds, 26 * 3600);
        assert_eq!(result.downtime_duration, "26h 0m 0s");
    }

    #[test]
    fn test_adjacent_days_have_no_full_day() {
        let result = compute(dec!(3000), &pht(2025, 3, 1, 23, 30), &pht(2025, 3, 2, 0, 45));

        assert_eq!(result.full_days, 0);
        assert_eq!(result.partial_start_hours, dec!(0.500));
        assert_eq!(result.partial_end_hours, dec!(0.750));
        // (0.5 + 0.75) * 4.167 = 5.20875
        assert_eq!(result.total_rebate, dec!(5.209));
        assert_eq!(result.total_rebate_rounded, 5);
    }

    #[test]
    fn test_start_at_midnight_folds_into_full_days() {
        let result = compute(dec!(3000), &pht(2025, 3, 1, 0, 0), &pht(2025, 3, 2, 6, 0));

        assert_eq!(result.partial_start_hours, Decimal::ZERO);
        assert_eq!(result.rebate_partial_start, Decimal::ZERO);
        assert_eq!(result.full_days, 1);
        assert_eq!(result.full_days_list, vec![date(2025, 3, 1)]);
        assert_eq!(result.partial_end_hours, dec!(6.000));
        // 100 + 6 * 4.167
        assert_eq!(result.total_rebate, dec!(125.002));
    }

    #[test]
    fn test_start_at_midnight_is_prepended() {
        let result = compute(dec!(3000), &pht(2025, 3, 1, 0, 0), &pht(2025, 3, 4, 1, 0));

        assert_eq!(result.full_days, 3);
        assert_eq!(
            result.full_days_list,
            vec![date(2025, 3, 1), date(2025, 3, 2), date(2025, 3, 3)]
        );
    }

    #[test]
    fn test_end_just_before_midnight_is_appended() {
        let start = pht(2025, 3, 1, 12, 0);
        let end = Manila
            .with_ymd_and_hms(2025, 3, 3, 23, 59, 59)
            .unwrap()
            .with_nanosecond(999_900_000)
            .unwrap();

        let result = compute(dec!(3000), &start, &end);

        // 23:59:59.9999 rounds to 24.000 hours and becomes a full day
        assert_eq!(result.partial_end_hours, Decimal::ZERO);
        assert_eq!(result.full_days, 2);
        assert_eq!(
            result.full_days_list,
            vec![date(2025, 3, 2), date(2025, 3, 3)]
        );
        assert_eq!(result.partial_start_hours, dec!(12.000));
    }

    #[test]
    fn test_end_at_midnight_has_no_end_partial() {
        let result = compute(dec!(3000), &pht(2025, 3, 1, 18, 0), &pht(2025, 3, 3, 0, 0));

        assert_eq!(result.partial_start_hours, dec!(6.000));
        assert_eq!(result.partial_end_hours, Decimal::ZERO);
        assert_eq!(result.full_days_list, vec![date(2025, 3, 2)]);
    }

    #[test]
    fn test_total_is_truncated_not_rounded() {
        // 720 / 30 = 24.000 daily, 1.000 hourly; 19h54m = 19.9 hours
        let result = compute(dec!(720), &pht(2025, 3, 1, 1, 0), &pht(2025, 3, 1, 20, 54));

        assert_eq!(result.total_rebate, dec!(19.900));
        assert_eq!(result.total_rebate_rounded, 19);
    }

    #[test]
    fn test_rates_scale_linearly_when_exact() {
        let start = pht(2025, 3, 1, 20, 0);
        let end = pht(2025, 3, 4, 5, 30);

        let single = compute(dec!(720), &start, &end);
        let double = compute(dec!(1440), &start, &end);

        assert_eq!(double.daily_rate, single.daily_rate * dec!(2));
        assert_eq!(double.hourly_rate, single.hourly_rate * dec!(2));
        assert_eq!(double.rebate_full_days, single.rebate_full_days * dec!(2));
        assert_eq!(
            double.rebate_partial_start,
            single.rebate_partial_start * dec!(2)
        );
        assert_eq!(double.rebate_partial_end, single.rebate_partial_end * dec!(2));
        assert_eq!(double.total_rebate, single.total_rebate * dec!(2));
    }

    #[test]
    fn test_rounding_happens_before_multiplication() {
        let calc = RebateCalculator::default();
        let start = pht(2025, 3, 1, 0, 0);
        let end = pht(2025, 3, 1, 10, 0);

        let result = calc.compute(dec!(3000), &start, &end);

        // 10 * 4.167, not 10 * (3000 / 30 / 24) = 41.6666..
        assert_eq!(result.total_rebate, dec!(41.670));
        assert_eq!(result.rebate_partial_start, dec!(41.67));
    }

    #[test]
    fn test_custom_month_length() {
        let calc = RebateCalculator::new(31);
        assert_eq!(calc.month_length(), 31);
        // 3100 / 31 = 100
        assert_eq!(calc.daily_rate(dec!(3100)), dec!(100.000));

        let result = calc.compute(dec!(3100), &pht(2025, 1, 1, 12, 0), &pht(2025, 1, 3, 12, 0));
        assert_eq!(result.month_length, 31);
        assert_eq!(result.full_days, 1);
        // 100 + 12 * 4.167 * 2
        assert_eq!(result.total_rebate, dec!(200.008));
    }

    #[test]
    fn test_zero_month_length_falls_back_to_default() {
        assert_eq!(RebateCalculator::new(0), RebateCalculator::default());
    }

    #[test]
    fn test_month_boundary_days() {
        let result = compute(dec!(3000), &pht(2024, 2, 27, 12, 0), &pht(2024, 3, 2, 12, 0));

        assert_eq!(
            result.full_days_list,
            vec![date(2024, 2, 28), date(2024, 2, 29), date(2024, 3, 1)]
        );
        assert_eq!(result.full_days, 3);
    }

    #[test]
    fn test_fixed_offset_timestamps() {
        let tz = FixedOffset::east_opt(8 * 3600).unwrap();
        let start = tz.with_ymd_and_hms(2025, 3, 1, 22, 0, 0).unwrap();
        let end = tz.with_ymd_and_hms(2025, 3, 3, 2, 0, 0).unwrap();

        let result = compute(dec!(3000), &start, &end);
        assert_eq!(result.full_days, 1);
        assert_eq!(result.total_rebate, dec!(116.668));
    }

    #[test]
    fn test_dst_day_follows_wall_clock() {
        // clocks in New York jump from 02:00 to 03:00 on 2024-03-10
        let start = New_York.with_ymd_and_hms(2024, 3, 9, 22, 0, 0).unwrap();
        let end = New_York.with_ymd_and_hms(2024, 3, 11, 2, 0, 0).unwrap();

        let result = compute(dec!(3000), &start, &end);

        assert_eq!(result.partial_start_hours, dec!(2.000));
        assert_eq!(result.partial_end_hours, dec!(2.000));
        assert_eq!(result.full_days_list, vec![date(2024, 3, 10)]);
        // 28 wall-clock hours are priced, 27 hours actually elapsed
        assert_eq!(result.total_rebate, dec!(116.668));
        assert_eq!(result.downtime_seconds, 27 * 3600);
        assert_eq!(result.downtime_duration, "27h 0m 0s");
    }

    #[test]
    fn test_dst_same_day_uses_elapsed_time() {
        let start = New_York.with_ymd_and_hms(2024, 3, 10, 1, 0, 0).unwrap();
        let end = New_York.with_ymd_and_hms(2024, 3, 10, 4, 0, 0).unwrap();

        let result = compute(dec!(3000), &start, &end);

        assert_eq!(result.partial_start_hours, dec!(2.000));
        assert_eq!(result.downtime_seconds, 2 * 3600);
    }

    #[test]
    fn test_huge_amounts_saturate() {
        let start = Utc.with_ymd_and_hms(1925, 1, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();

        let result = compute(Decimal::from_i128_with_scale(10i128.pow(27), 0), &start, &end);

        assert_eq!(result.full_days, 36525);
        assert_eq!(result.rebate_full_days, Decimal::MAX);
        assert_eq!(result.total_rebate, Decimal::MAX);
        assert_eq!(result.total_rebate_rounded, i64::MAX);
    }

    #[test]
    fn test_rounded_total_clamps_above_i64() {
        let start = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2028, 1, 1, 0, 0, 0).unwrap();

        let result = compute(Decimal::from_i128_with_scale(10i128.pow(22), 0), &start, &end);

        assert_eq!(result.full_days, 1095);
        assert!(result.total_rebate > Decimal::from(i64::MAX));
        assert_eq!(result.total_rebate_rounded, i64::MAX);
    }

    #[test]
    fn test_truncate_keeps_sign_and_bounds() {
        assert_eq!(truncate(dec!(19.999)), 19);
        assert_eq!(truncate(dec!(-3.7)), -3);
        assert_eq!(truncate(Decimal::MAX), i64::MAX);
        assert_eq!(truncate(Decimal::MIN), i64::MIN);
    }
}
