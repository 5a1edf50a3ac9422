//! Migrate command - applies pending migrations and exits

use tracing::info;

use crate::infrastructure::storage::SqliteMigrator;

pub async fn run() -> anyhow::Result<()> {
    let config = super::bootstrap()?;

    let pool = crate::open_database(&config).await?;
    let version = SqliteMigrator::new(pool.clone()).current_version().await?;
    pool.close().await;

    info!(
        database = %config.database_path().display(),
        version = ?version,
        "Database is up to date"
    );

    Ok(())
}
