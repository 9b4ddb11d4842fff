//! PostgreSQL-backed [`EntityStore`].
//!
//! Amounts are uint256-range values, wider than any native integer column,
//! so they travel as text and are cast to NUMERIC inside the statement.

use std::str::FromStr;

use alloy_primitives::U256;
use async_trait::async_trait;
use deadpool_postgres::{Manager, ManagerConfig, Pool, RecyclingMethod, Runtime};
use tokio_postgres::{NoTls, Row};

use super::error::StoreError;
use super::types::{BuyEvent, ClaimEvent, StoreOp, User};
use super::{migrations, EntityStore};

const UPSERT_USER: &str = "INSERT INTO users (id, claimed, claim_events, buy_events) \
     VALUES ($1, $2::text::numeric, $3, $4) \
     ON CONFLICT (id) DO UPDATE SET \
        claimed = EXCLUDED.claimed, \
        claim_events = EXCLUDED.claim_events, \
        buy_events = EXCLUDED.buy_events";

const UPSERT_CLAIM_EVENT: &str =
    "INSERT INTO claim_events (id, \"user\", amount, \"timestamp\") \
     VALUES ($1, $2, $3::text::numeric, $4) \
     ON CONFLICT (id) DO UPDATE SET \
        \"user\" = EXCLUDED.\"user\", \
        amount = EXCLUDED.amount, \
        \"timestamp\" = EXCLUDED.\"timestamp\"";

const UPSERT_BUY_EVENT: &str =
    "INSERT INTO buy_events (id, asset_id, amount, old_owner_id, new_owner_id, \"timestamp\") \
     VALUES ($1, $2, $3::text::numeric, $4, $5, $6) \
     ON CONFLICT (id) DO UPDATE SET \
        asset_id = EXCLUDED.asset_id, \
        amount = EXCLUDED.amount, \
        old_owner_id = EXCLUDED.old_owner_id, \
        new_owner_id = EXCLUDED.new_owner_id, \
        \"timestamp\" = EXCLUDED.\"timestamp\"";

pub struct PgStore {
    pool: Pool,
}

impl PgStore {
    pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
        let config = database_url
            .parse::<tokio_postgres::Config>()
            .map_err(|e| StoreError::InvalidConnectionString(e.to_string()))?;

        let manager_config = ManagerConfig {
            recycling_method: RecyclingMethod::Fast,
        };

        let manager = Manager::from_config(config, NoTls, manager_config);

        let pool = Pool::builder(manager)
            .max_size(16)
            .runtime(Runtime::Tokio1)
            .build()
            .map_err(StoreError::Build)?;

        let _conn = pool.get().await?;
        tracing::info!("Database connection pool created successfully");

        Ok(Self { pool })
    }

    pub fn inner(&self) -> &Pool {
        &self.pool
    }

    pub async fn run_migrations(&self) -> Result<(), StoreError> {
        migrations::run(&self.pool).await
    }
}

#[async_trait]
impl EntityStore for PgStore {
    async fn load_user(&self, id: &str) -> Result<Option<User>, StoreError> {
        let client = self.pool.get().await?;
        let row = client
            .query_opt(
                "SELECT id, claimed::text, claim_events, buy_events FROM users WHERE id = $1",
                &[&id],
            )
            .await?;
        row.map(user_from_row).transpose()
    }

    async fn load_claim_event(&self, id: &str) -> Result<Option<ClaimEvent>, StoreError> {
        let client = self.pool.get().await?;
        let row = client
            .query_opt(
                "SELECT id, \"user\", amount::text, \"timestamp\" FROM claim_events WHERE id = $1",
                &[&id],
            )
            .await?;
        row.map(claim_event_from_row).transpose()
    }

    async fn load_buy_event(&self, id: &str) -> Result<Option<BuyEvent>, StoreError> {
        let client = self.pool.get().await?;
        let row = client
            .query_opt(
                "SELECT id, asset_id, amount::text, old_owner_id, new_owner_id, \"timestamp\" \
                 FROM buy_events WHERE id = $1",
                &[&id],
            )
            .await?;
        row.map(buy_event_from_row).transpose()
    }

    async fn apply(&self, ops: Vec<StoreOp>) -> Result<(), StoreError> {
        if ops.is_empty() {
            return Ok(());
        }

        let mut client = self.pool.get().await?;
        let transaction = client.transaction().await?;

        for op in &ops {
            let result = match op {
                StoreOp::SaveUser(user) => {
                    let claimed = user.claimed.to_string();
                    transaction
                        .execute(
                            UPSERT_USER,
                            &[&user.id, &claimed, &user.claim_events, &user.buy_events],
                        )
                        .await
                }
                StoreOp::SaveClaimEvent(event) => {
                    let amount = event.amount.to_string();
                    let timestamp = event.timestamp as i64;
                    transaction
                        .execute(
                            UPSERT_CLAIM_EVENT,
                            &[&event.id, &event.user, &amount, &timestamp],
                        )
                        .await
                }
                StoreOp::SaveBuyEvent(event) => {
                    let amount = event.amount.to_string();
                    let timestamp = event.timestamp as i64;
                    transaction
                        .execute(
                            UPSERT_BUY_EVENT,
                            &[
                                &event.id,
                                &event.asset_id,
                                &amount,
                                &event.old_owner_id,
                                &event.new_owner_id,
                                &timestamp,
                            ],
                        )
                        .await
                }
            };

            if let Err(e) = result {
                let err: StoreError = e.into();
                tracing::error!("Store operation failed: {}", err);
                return Err(err);
            }
        }

        transaction.commit().await?;
        Ok(())
    }
}

fn parse_numeric(column: &'static str, raw: String) -> Result<U256, StoreError> {
    U256::from_str(&raw).map_err(|_| StoreError::CorruptNumeric { column, value: raw })
}

fn user_from_row(row: Row) -> Result<User, StoreError> {
    Ok(User {
        id: row.get(0),
        claimed: parse_numeric("users.claimed", row.get(1))?,
        claim_events: row.get(2),
        buy_events: row.get(3),
    })
}

fn claim_event_from_row(row: Row) -> Result<ClaimEvent, StoreError> {
    let timestamp: i64 = row.get(3);
    Ok(ClaimEvent {
        id: row.get(0),
        user: row.get(1),
        amount: parse_numeric("claim_events.amount", row.get(2))?,
        timestamp: timestamp as u64,
    })
}

fn buy_event_from_row(row: Row) -> Result<BuyEvent, StoreError> {
    let timestamp: i64 = row.get(5);
    Ok(BuyEvent {
        id: row.get(0),
        asset_id: row.get(1),
        amount: parse_numeric("buy_events.amount", row.get(2))?,
        old_owner_id: row.get(3),
        new_owner_id: row.get(4),
        timestamp: timestamp as u64,
    })
}
