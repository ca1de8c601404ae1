use anyhow::Result;
use category_slugs::application::migrations::{Migration, SetCategorySlugToLower};
use category_slugs::application::ports::{time::Clock, util::SlugGenerator};
use category_slugs::config::{AppConfig, MigrationDirection};
use category_slugs::infrastructure::{
    database, migrator::PostgresMigrator, time::SystemClock, util::DefaultSlugGenerator,
};
use std::sync::Arc;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_LOG_FILTER: &str = "info,category_slugs=info,sqlx=warn";

#[tokio::main]
async fn main() {
    if let Err(err) = bootstrap().await {
        tracing::error!(error = %err, "fatal error");
        eprintln!("fatal error: {err}");
        std::process::exit(1);
    }
}

async fn bootstrap() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let direction = MigrationDirection::from_args(std::env::args().skip(1))?;
    let config = AppConfig::from_env()?;

    let pool = database::init_pool(config.database_url(), config.max_connections()).await?;

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let slugger: Arc<dyn SlugGenerator> = Arc::new(DefaultSlugGenerator);
    let migration = SetCategorySlugToLower::new(slugger);
    let migrator = PostgresMigrator::new(pool.clone(), clock, config.lock_timeout());

    let outcome = match direction {
        MigrationDirection::Up => migrator.up(&migration).await?,
        MigrationDirection::Down => migrator.down(&migration).await?,
    };
    tracing::info!(
        version = %migration.version(),
        %direction,
        ?outcome,
        "migration finished"
    );
    println!("{} {}: {outcome:?}", migration.version(), migration.name());

    pool.close().await;
    Ok(())
}

/// Logs go to stderr so that a runner capturing stdout only sees the outcome.
fn init_tracing() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let subscriber = tracing_subscriber::registry().with(env_filter).with(
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false),
    );

    if subscriber.try_init().is_err() {
        tracing::warn!("tracing subscriber already initialised");
    }
}
