#![cfg(test)]
use migration::MigratorTrait;
use sea_orm::DatabaseConnection;
use tokio::sync::OnceCell;

// Migrations run once per test process.
static MIGRATED: OnceCell<bool> = OnceCell::const_new();

/// A migrated connection, or `None` when database tests are disabled or no
/// database is reachable.
pub async fn get_db() -> Option<DatabaseConnection> {
    if std::env::var("SKIP_DB_TESTS").is_ok() || std::env::var("DATABASE_URL").is_err() {
        return None;
    }
    let migrated = *MIGRATED
        .get_or_init(|| async {
            match models::db::connect().await {
                Ok(db) => migration::Migrator::up(&db, None).await.is_ok(),
                Err(_) => false,
            }
        })
        .await;
    if !migrated {
        eprintln!("skip: database unavailable or migration failed");
        return None;
    }
    // Fresh pool for the current test's runtime.
    models::db::connect().await.ok()
}
