//! Client repository implementation
//!
//! PostgreSQL-backed client-rate lookup. `plan_rate` is stored as a float
//! column by the helpdesk schema, so queries cast it to `numeric` before
//! decoding into `Decimal`.

use async_trait::async_trait;
use kick_core::{
    models::{Client, ClientStatus},
    traits::ClientRepository,
    AppError, AppResult,
};
use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::{debug, error, instrument};

/// PostgreSQL implementation of ClientRepository
pub struct PgClientRepository {
    pool: PgPool,
}

impl PgClientRepository {
    /// Create a new client repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Convert database status string to enum
    fn parse_status(s: &str) -> ClientStatus {
        ClientStatus::from_str(s).unwrap_or(ClientStatus::Active)
    }
}

#[async_trait]
impl ClientRepository for PgClientRepository {
    #[instrument(skip(self))]
    async fn find_by_account_number(&self, account_number: &str) -> AppResult<Option<Client>> {
        debug!("Finding client by account number: {}", account_number);

        let normalized = Client::normalize_account_number(account_number);

        let result = sqlx::query_as::<sqlx::Postgres, ClientRow>(
            r#"
            SELECT
                id, account_number, account_name, status,
                plan_rate::numeric AS plan_rate, region_id
            FROM clients
            WHERE account_number = $1
            "#,
        )
        .bind(&normalized)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("Database error finding client by account number: {}", e);
            AppError::Database(format!("Failed to find client: {}", e))
        })?;

        Ok(result.map(Into::into))
    }
}

/// Helper struct for mapping database rows
#[derive(Debug, sqlx::FromRow)]
struct ClientRow {
    id: i32,
    account_number: String,
    account_name: String,
    status: Option<String>,
    plan_rate: Option<Decimal>,
    region_id: Option<i32>,
}

impl From<ClientRow> for Client {
    fn from(row: ClientRow) -> Self {
        Self {
            id: row.id,
            account_number: row.account_number,
            account_name: row.account_name,
            status: row
                .status
                .as_deref()
                .map(PgClientRepository::parse_status)
                .unwrap_or_default(),
            plan_rate: row.plan_rate.unwrap_or(Decimal::ZERO),
            region_id: row.region_id,
        }
    }
}
