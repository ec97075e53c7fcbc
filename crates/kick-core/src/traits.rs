//! Common traits for repositories
//!
//! Defines abstractions for database access so services can be exercised
//! against in-memory stores in tests.

use crate::error::AppError;
use crate::models::Client;
use async_trait::async_trait;

/// Client-rate lookup
#[async_trait]
pub trait ClientRepository: Send + Sync {
    /// Find client by account number
    async fn find_by_account_number(
        &self,
        account_number: &str,
    ) -> Result<Option<Client>, AppError>;
}
