//! Business logic services for the KICK helpdesk
//!
//! This crate contains the downtime rebate logic and the services that
//! feed it.
//!
//! # Architecture
//!
//! - The calculator is a pure function of its inputs and never fails
//! - Services own their dependencies behind `Arc` and do the precondition
//!   checks (account lookup, plan rate) before calling the calculator
//! - All service entry points are instrumented with tracing
//!
//! # Services
//!
//! - `RebateCalculator` - Downtime proration into partial and full days
//! - `RebateService` - Client lookup, timezone localization and pricing
//! - `InMemoryClientRepository` - Client store for tests and demos

pub mod duration;
pub mod memory;
pub mod rebate;
pub mod rebate_service;
pub mod timezone;

pub use duration::format_duration;
pub use memory::InMemoryClientRepository;
pub use rebate::{compute, RebateCalculator};
pub use rebate_service::{RebatePreview, RebateQuote, RebateService};
pub use timezone::localize;

/// Business logic constants
pub mod constants {
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    /// Days in a billing month when deriving the daily rate
    pub const DEFAULT_MONTH_LENGTH: u32 = 30;

    /// Largest monthly rate accepted from callers
    pub const MAX_MONTHLY_RATE: Decimal = dec!(1000000000);
}
