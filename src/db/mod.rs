pub mod memory;
pub mod postgres;

pub use memory::MemoryStorage;
pub use postgres::PgStorage;

use chrono::{DateTime, Utc};

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::models::{HistoricalResult, Prediction, PredictionKey, RunAudit, UpcomingMatch};
use crate::reconcile::OutcomeUpdate;

pub async fn init_pool(database_url: &str) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;

    // Verify connectivity
    sqlx::query("SELECT 1").execute(&pool).await?;

    Ok(pool)
}

/// The set/query/persist contract the engine consumes. The relational
/// engine behind it is a collaborator; the core only relies on equality
/// lookups over the natural identity fields.
#[allow(async_fn_in_trait)]
pub trait Storage {
    async fn historical_results(&self) -> anyhow::Result<Vec<HistoricalResult>>;

    async fn result_exists(
        &self,
        home_team: &str,
        away_team: &str,
        league: &str,
        kickoff: DateTime<Utc>,
    ) -> anyhow::Result<bool>;

    async fn insert_result(&self, result: &HistoricalResult) -> anyhow::Result<()>;

    async fn upcoming_exists(
        &self,
        home_team: &str,
        away_team: &str,
        league: &str,
        kickoff: &str,
    ) -> anyhow::Result<bool>;

    async fn insert_upcoming(&self, fixture: &UpcomingMatch) -> anyhow::Result<()>;

    /// Predictions whose match date equals the given `dd-MM-yyyy` key.
    async fn predictions_for_date(&self, date: &str) -> anyhow::Result<Vec<Prediction>>;

    async fn prediction_exists(&self, key: &PredictionKey) -> anyhow::Result<bool>;

    async fn insert_prediction(&self, prediction: &Prediction) -> anyhow::Result<()>;

    /// Stamp actual outcome and score on a stored prediction. The only
    /// mutation predictions ever receive.
    async fn record_outcome(&self, update: &OutcomeUpdate) -> anyhow::Result<()>;

    async fn append_audit(&self, audit: &RunAudit) -> anyhow::Result<()>;

    /// Retention sweep: remove upcoming fixtures ingested before the cutoff.
    /// Predictions and historical results are never swept.
    async fn purge_stale_upcoming(&self, cutoff: DateTime<Utc>) -> anyhow::Result<u64>;
}
