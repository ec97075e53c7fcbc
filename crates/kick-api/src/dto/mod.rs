//! Data Transfer Objects (DTOs) for API requests and responses

pub mod common;
pub mod rebate;

pub use common::*;
pub use rebate::*;
