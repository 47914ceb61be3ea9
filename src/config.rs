use anyhow::{Context, Result};
use model::entities::user;
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ColumnTrait, Database, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set};
use serde::Deserialize;
use tracing::{debug, info, trace};

use crate::schemas::AppState;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://fintrack.db?mode=rwc";
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:3000";

/// Runtime settings.
///
/// Layered as built-in defaults, then an optional `fintrack.toml` in the
/// working directory, then `FINTRACK_*` environment variables (a `.env`
/// file is loaded first). CLI flags are applied on top by the caller.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub database_url: String,
    pub bind_address: String,
    /// Owner of every record.
    pub demo_username: String,
    /// Income used by loan assessments that do not state one.
    pub default_monthly_income: Decimal,
    pub request_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            demo_username: "demo".to_string(),
            default_monthly_income: Decimal::from(90_000),
            request_timeout_secs: 30,
        }
    }
}

impl Settings {
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        let settings = config::Config::builder()
            .set_default("database_url", DEFAULT_DATABASE_URL)?
            .set_default("bind_address", DEFAULT_BIND_ADDRESS)?
            .set_default("demo_username", "demo")?
            .set_default("default_monthly_income", "90000")?
            .set_default("request_timeout_secs", 30_i64)?
            .add_source(config::File::with_name("fintrack").required(false))
            .add_source(config::Environment::with_prefix("FINTRACK"))
            .build()
            .context("Failed to read configuration")?
            .try_deserialize::<Settings>()
            .context("Invalid configuration")?;

        debug!(?settings, "Configuration loaded");
        Ok(settings)
    }

    /// Replaces the database URL and bind address with explicit overrides.
    pub fn with_overrides(mut self, database_url: Option<String>, bind_address: Option<String>) -> Self {
        if let Some(database_url) = database_url {
            self.database_url = database_url;
        }
        if let Some(bind_address) = bind_address {
            self.bind_address = bind_address;
        }
        self
    }
}

/// Returns the id of the user called `username`, creating it when missing.
pub async fn ensure_owner(db: &DatabaseConnection, username: &str) -> Result<i32, DbErr> {
    trace!("Looking up owner '{}'", username);
    if let Some(existing) = user::Entity::find()
        .filter(user::Column::Username.eq(username))
        .one(db)
        .await?
    {
        debug!("Owner '{}' has ID {}", username, existing.id);
        return Ok(existing.id);
    }

    let created = user::ActiveModel {
        username: Set(username.to_string()),
        ..Default::default()
    }
    .insert(db)
    .await?;
    info!("Created owner '{}' with ID {}", username, created.id);
    Ok(created.id)
}

/// Builds the state for an already connected (and migrated) database.
pub async fn app_state_for(db: DatabaseConnection, settings: Settings) -> Result<AppState> {
    let owner_id = ensure_owner(&db, &settings.demo_username)
        .await
        .context("Failed to provision the demo user")?;
    Ok(AppState {
        db,
        owner_id,
        settings,
    })
}

/// Connects to the configured database and builds the application state.
pub async fn initialize_app_state(settings: Settings) -> Result<AppState> {
    info!("Connecting to database: {}", settings.database_url);
    let db = Database::connect(&settings.database_url)
        .await
        .with_context(|| format!("Failed to connect to database '{}'", settings.database_url))?;
    app_state_for(db, settings).await
}
