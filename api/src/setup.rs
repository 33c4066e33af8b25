use anyhow::{Context, Result};
use roster_db::SqliteRosterRepository;
use std::sync::Arc;
use tracing::info;

use crate::config::Config;

/// Create the roster repository from the loaded configuration:
/// connect, migrate, and verify connectivity.
pub async fn create_repository(config: &Config) -> Result<Arc<SqliteRosterRepository>> {
    let database_url = config.database_url();
    info!("Initializing SQLite repository at: {}", database_url);

    let repo = SqliteRosterRepository::new(&database_url)
        .await
        .context("Failed to create SQLite repository")?;

    info!("Running database migrations");
    repo.migrate()
        .await
        .context("Failed to run database migrations")?;

    repo.health_check()
        .await
        .context("Database health check failed")?;

    info!("Roster repository ready");
    Ok(Arc::new(repo))
}
