//! KICK Database Layer
//!
//! This crate provides PostgreSQL database access and repository implementations
//! for the KICK rebate service. It includes:
//!
//! - Connection pool management with sqlx
//! - Embedded schema migrations
//! - The client-rate lookup repository

pub mod pool;
pub mod repositories;

pub use pool::{create_pool, create_pool_from_config, run_migrations};
pub use repositories::*;

// Re-export commonly used types
pub use kick_core::{AppError, AppResult};
pub use sqlx::PgPool;
