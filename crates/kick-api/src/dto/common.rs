//! Common DTOs used across the API

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

/// Timestamp layouts accepted for operator-entered local times
const LOCAL_DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S",
];

/// Standard API response wrapper
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T> {
    /// Response data
    pub data: T,
    /// Response message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Create a success response with data
    pub fn success(data: T) -> Self {
        Self {
            data,
            message: None,
        }
    }

    /// Create a success response with data and message
    pub fn with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            data,
            message: Some(message.into()),
        }
    }
}

/// Parse a naive local timestamp such as `2025-03-01T22:00`
pub fn parse_local_datetime(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    LOCAL_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
}

/// Deserialize a naive local timestamp from any accepted layout
pub fn deserialize_local_datetime<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de;

    let raw = String::deserialize(deserializer)?;
    parse_local_datetime(&raw).ok_or_else(|| {
        de::Error::custom(format!(
            "invalid timestamp '{}', expected YYYY-MM-DDTHH:MM",
            raw
        ))
    })
}

/// Currency display: 2 decimal places
pub fn format_money(amount: Decimal) -> String {
    format!("{:.2}", amount.round_dp(2))
}

/// Hour and rate display: 3 decimal places
pub fn format_3dp(value: Decimal) -> String {
    format!("{:.3}", value.round_dp(3))
}
