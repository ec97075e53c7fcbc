//! Repository implementations
//!
//! Concrete implementations of the repository traits defined in kick-core,
//! using sqlx for PostgreSQL access.

pub mod client_repo;

pub use client_repo::PgClientRepository;
