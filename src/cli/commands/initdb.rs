use anyhow::{Context, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection};
use tracing::{debug, info, trace};

use crate::config::Settings;

/// Connects to `database_url` and applies every pending migration.
pub(crate) async fn migrate(database_url: &str) -> Result<DatabaseConnection> {
    trace!("Attempting to connect to database");
    let db = Database::connect(database_url)
        .await
        .with_context(|| format!("Failed to connect to database '{}'", database_url))?;
    info!("Successfully connected to database");

    info!("Running database migrations");
    Migrator::up(&db, None)
        .await
        .context("Failed to run database migrations")?;
    debug!("All pending migrations have been applied");
    Ok(db)
}

pub async fn init_database(database_url: Option<String>) -> Result<()> {
    trace!("Entering init_database function");
    let settings = Settings::load()?.with_overrides(database_url, None);
    info!("Initializing database {}", settings.database_url);

    migrate(&settings.database_url).await?;

    info!("Database initialization completed successfully!");
    Ok(())
}
