//! Timezone localization
//!
//! Operators enter downtime as naive wall-clock timestamps. Before the
//! calculator runs, both ends are pinned to the helpdesk's reference
//! timezone.

use chrono::{DateTime, LocalResult, NaiveDateTime, TimeZone};
use chrono_tz::Tz;
use kick_core::{AppError, AppResult};
use tracing::warn;

/// Interpret `naive` as a wall-clock time in `tz`
///
/// Ambiguous times (clocks turned back) resolve to the earlier instant.
/// Times skipped by a forward transition do not exist and are rejected.
pub fn localize(tz: Tz, naive: NaiveDateTime) -> AppResult<DateTime<Tz>> {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Ok(dt),
        LocalResult::Ambiguous(earliest, _) => Ok(earliest),
        LocalResult::None => {
            warn!(%naive, tz = %tz.name(), "Local time does not exist");
            Err(AppError::InvalidInput(format!(
                "{} does not exist in timezone {}",
                naive.format("%Y-%m-%d %H:%M"),
                tz.name()
            )))
        }
    }
}
