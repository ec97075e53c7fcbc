//! HTTP request handlers

pub mod client;
pub mod health;
pub mod rebate;

pub use client::configure as configure_clients;
pub use health::health_check;
pub use rebate::configure as configure_rebates;
