use std::collections::HashSet;

use deadpool_postgres::Pool;

use super::error::StoreError;

/// Migrations are embedded at compile time so the store works regardless of
/// the process working directory. Listed in application order.
const MIGRATIONS: &[(&str, &str)] = &[
    (
        "tables/users.sql",
        include_str!("../../migrations/tables/users.sql"),
    ),
    (
        "tables/claim_events.sql",
        include_str!("../../migrations/tables/claim_events.sql"),
    ),
    (
        "tables/buy_events.sql",
        include_str!("../../migrations/tables/buy_events.sql"),
    ),
];

pub async fn run(pool: &Pool) -> Result<(), StoreError> {
    let client = pool.get().await?;

    client
        .execute(
            "CREATE TABLE IF NOT EXISTS _migrations (
                id SERIAL PRIMARY KEY,
                name VARCHAR(255) NOT NULL UNIQUE,
                applied_at TIMESTAMP WITH TIME ZONE DEFAULT NOW()
            )",
            &[],
        )
        .await?;

    let rows = client.query("SELECT name FROM _migrations", &[]).await?;
    let applied: HashSet<String> = rows.iter().map(|row| row.get(0)).collect();

    for (name, sql) in MIGRATIONS.iter().copied() {
        if applied.contains(name) {
            continue;
        }

        let mut client = pool.get().await?;
        let tx = client.transaction().await?;

        tx.batch_execute(sql).await.map_err(|e| {
            StoreError::Migration(format!("Failed to run migration {}: {}", name, e))
        })?;

        tx.execute("INSERT INTO _migrations (name) VALUES ($1)", &[&name])
            .await?;

        tx.commit().await?;

        tracing::info!("Applied migration: {}", name);
    }

    tracing::info!("All migrations up to date");
    Ok(())
}
