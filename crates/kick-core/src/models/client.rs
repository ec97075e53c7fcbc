//! Client model
//!
//! Represents a subscriber account of the helpdesk together with the
//! monthly plan rate downtime rebates are prorated from.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Client status enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ClientStatus {
    #[default]
    Active,
    Inactive,
    Disconnected,
}

impl fmt::Display for ClientStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientStatus::Active => write!(f, "Active"),
            ClientStatus::Inactive => write!(f, "Inactive"),
            ClientStatus::Disconnected => write!(f, "Disconnected"),
        }
    }
}

impl ClientStatus {
    /// Parse from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "active" => Some(ClientStatus::Active),
            "inactive" => Some(ClientStatus::Inactive),
            "disconnected" => Some(ClientStatus::Disconnected),
            _ => None,
        }
    }
}

/// Client entity
///
/// A subscriber known to the helpdesk. `plan_rate` is the contracted
/// monthly price; zero means no rate has been entered yet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Client {
    /// Unique identifier
    pub id: i32,

    /// Account number (unique identifier for external systems)
    pub account_number: String,

    /// Subscriber name
    pub account_name: String,

    /// Account status
    pub status: ClientStatus,

    /// Monthly plan rate
    pub plan_rate: Decimal,

    /// Region the client belongs to
    pub region_id: Option<i32>,
}

impl Client {
    /// Whether a usable (positive) plan rate is on file
    #[inline]
    pub fn has_plan_rate(&self) -> bool {
        self.plan_rate > Decimal::ZERO
    }

    /// Normalize an account number typed by an operator
    pub fn normalize_account_number(account_number: &str) -> String {
        account_number.trim().to_string()
    }
}

impl Default for Client {
    fn default() -> Self {
        Self {
            id: 0,
            account_number: String::new(),
            account_name: String::new(),
            status: ClientStatus::Active,
            plan_rate: Decimal::ZERO,
            region_id: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_has_plan_rate() {
        let client = Client {
            plan_rate: dec!(1499.00),
            ..Default::default()
        };
        assert!(client.has_plan_rate());

        let client = Client::default();
        assert!(!client.has_plan_rate());

        let client = Client {
            plan_rate: dec!(-1),
            ..Default::default()
        };
        assert!(!client.has_plan_rate());
    }

    #[test]
    fn test_status_parsing() {
        assert_eq!(ClientStatus::from_str("ACTIVE"), Some(ClientStatus::Active));
        assert_eq!(
            ClientStatus::from_str("disconnected"),
            Some(ClientStatus::Disconnected)
        );
        assert_eq!(ClientStatus::from_str("gone"), None);
        assert_eq!(ClientStatus::Inactive.to_string(), "Inactive");
    }

    #[test]
    fn test_normalize_account_number() {
        assert_eq!(Client::normalize_account_number("  10042 "), "10042");
    }
}
