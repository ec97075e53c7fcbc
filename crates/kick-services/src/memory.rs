//! In-memory client store
//!
//! Backs the rebate service in tests and local demos where no PostgreSQL
//! instance is available.

use async_trait::async_trait;
use kick_core::{models::Client, traits::ClientRepository, AppResult};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Client repository keyed by account number
#[derive(Debug, Clone, Default)]
pub struct InMemoryClientRepository {
    clients: Arc<RwLock<HashMap<String, Client>>>,
}

impl InMemoryClientRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store pre-populated with `clients`
    pub fn with_clients(clients: impl IntoIterator<Item = Client>) -> Self {
        let map = clients
            .into_iter()
            .map(|c| (Client::normalize_account_number(&c.account_number), c))
            .collect();

        Self {
            clients: Arc::new(RwLock::new(map)),
        }
    }

    /// Insert or replace a client
    pub async fn insert(&self, client: Client) {
        let key = Client::normalize_account_number(&client.account_number);
        self.clients.write().await.insert(key, client);
    }
}

#[async_trait]
impl ClientRepository for InMemoryClientRepository {
    async fn find_by_account_number(&self, account_number: &str) -> AppResult<Option<Client>> {
        let key = Client::normalize_account_number(account_number);
        Ok(self.clients.read().await.get(&key).cloned())
    }
}
