use tokio::time::Duration;

use goalcast::config::{AppConfig, EngineConfig};
use goalcast::db::{self, PgStorage};
use goalcast::feed::HttpFeed;
use goalcast::services::RunOrchestrator;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env()?;

    tracing::info!("Connecting to database...");
    let pool = db::init_pool(&config.database_url).await?;
    let storage = PgStorage::new(pool);
    storage.ensure_schema().await?;
    tracing::info!("Database connected");

    let feed = HttpFeed::new(reqwest::Client::new(), config.feed_base_url.clone());
    let orchestrator = RunOrchestrator::new(
        storage,
        feed,
        EngineConfig::default(),
        Duration::from_secs(config.scores_timeout_secs),
    );

    let summary = orchestrator.run_once().await?;
    tracing::info!(
        fixtures = summary.fixtures_seen,
        predictions = summary.predictions_emitted,
        outcomes = summary.outcomes_recorded,
        "Run finished"
    );

    Ok(())
}

fn init_tracing() {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer())
        .init();
}
