//! Domain models for the KICK rebate service

pub mod client;
pub mod rebate;

pub use client::{Client, ClientStatus};
pub use rebate::RebateResult;
