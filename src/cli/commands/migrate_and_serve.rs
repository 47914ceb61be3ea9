use anyhow::Result;
use tracing::{info, trace};

use super::initdb::migrate;
use super::serve::run_server;
use crate::cli::ServerArgs;
use crate::config::{app_state_for, Settings};

pub async fn migrate_and_serve(args: ServerArgs) -> Result<()> {
    trace!("Entering migrate_and_serve function");
    let settings = Settings::load()?.with_overrides(args.database_url, args.bind_address);
    info!("Applying database migrations and starting server");

    let db = migrate(&settings.database_url).await?;
    let state = app_state_for(db, settings).await?;
    run_server(state).await
}
