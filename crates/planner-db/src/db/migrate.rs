//! Embedded schema migrations.

use diesel::{Connection, SqliteConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// ## Summary
/// Applies pending migrations to the database at `database_url`, creating the
/// file if it does not exist yet.
///
/// Runs on a blocking thread with a plain synchronous connection.
///
/// ## Errors
/// Returns an error if the database cannot be opened or a migration fails.
#[tracing::instrument]
pub async fn run_migrations(database_url: &str) -> anyhow::Result<()> {
    let url = database_url.to_string();
    let applied = tokio::task::spawn_blocking(move || {
        let mut conn = SqliteConnection::establish(&url)?;
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| anyhow::anyhow!("Failed to run migrations: {e}"))?
            .len();
        Ok::<_, anyhow::Error>(applied)
    })
    .await??;

    tracing::info!(applied, "Database migrations complete");
    Ok(())
}
