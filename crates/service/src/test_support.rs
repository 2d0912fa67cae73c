#![cfg(test)]
use migration::MigratorTrait;
use sea_orm::DatabaseConnection;
use tokio::sync::OnceCell;

// Ensure migrations run only once across the entire test process
static MIGRATED: OnceCell<()> = OnceCell::const_new();

/// Connection for DB-backed tests. Errors (no reachable database,
/// SKIP_DB_TESTS set) are the caller's cue to skip the test.
pub async fn get_db() -> anyhow::Result<DatabaseConnection> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        anyhow::bail!("SKIP_DB_TESTS set");
    }
    let db = models::db::connect().await?;
    MIGRATED
        .get_or_init(|| async {
            if let Err(e) = migration::Migrator::up(&db, None).await {
                eprintln!("migrate up failed: {}", e);
            }
        })
        .await;
    Ok(db)
}
