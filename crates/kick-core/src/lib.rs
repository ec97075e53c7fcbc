//! KICK Core Library
//!
//! This crate provides the foundational types, traits, and error handling
//! for the KICK helpdesk rebate service. It includes:
//!
//! - Domain models (Client, RebateResult)
//! - Repository traits for client-rate lookup
//! - Unified error handling with HTTP response mapping
//! - Application configuration

pub mod config;
pub mod error;
pub mod models;
pub mod traits;

pub use config::{AppConfig, RebateConfig};
pub use error::AppError;

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;
