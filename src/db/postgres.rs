use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::db::Storage;
use crate::models::{HistoricalResult, Prediction, PredictionKey, RunAudit, UpcomingMatch};
use crate::reconcile::OutcomeUpdate;

/// Postgres-backed implementation of the storage contract.
#[derive(Debug, Clone)]
pub struct PgStorage {
    pool: PgPool,
}

impl PgStorage {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Idempotent table bootstrap. Migration tooling is out of scope; this
    /// keeps the binary runnable against a fresh database.
    pub async fn ensure_schema(&self) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS historical_results (
                id UUID PRIMARY KEY,
                home_team TEXT NOT NULL,
                away_team TEXT NOT NULL,
                league TEXT NOT NULL,
                kickoff TIMESTAMPTZ NOT NULL,
                home_goals INT NOT NULL,
                away_goals INT NOT NULL,
                both_scored BOOLEAN NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS upcoming_matches (
                id UUID PRIMARY KEY,
                home_team TEXT NOT NULL,
                away_team TEXT NOT NULL,
                league TEXT NOT NULL,
                kickoff TEXT NOT NULL,
                signals JSONB NOT NULL,
                ingested_at TIMESTAMPTZ NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS predictions (
                id UUID PRIMARY KEY,
                home_team TEXT NOT NULL,
                away_team TEXT NOT NULL,
                league TEXT NOT NULL,
                match_date TEXT NOT NULL,
                match_time TEXT NOT NULL,
                category TEXT NOT NULL,
                predicted_outcome TEXT NOT NULL,
                confidence DOUBLE PRECISION NOT NULL,
                actual_outcome TEXT,
                actual_score TEXT,
                created_at TIMESTAMPTZ NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS run_audits (
                id UUID PRIMARY KEY,
                at TIMESTAMPTZ NOT NULL,
                status TEXT NOT NULL,
                message TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

#[derive(FromRow)]
struct ResultRow {
    id: Uuid,
    home_team: String,
    away_team: String,
    league: String,
    kickoff: DateTime<Utc>,
    home_goals: i32,
    away_goals: i32,
    both_scored: bool,
}

impl From<ResultRow> for HistoricalResult {
    fn from(r: ResultRow) -> Self {
        HistoricalResult {
            id: r.id,
            home_team: r.home_team,
            away_team: r.away_team,
            league: r.league,
            kickoff: r.kickoff,
            home_goals: r.home_goals,
            away_goals: r.away_goals,
            both_scored: r.both_scored,
        }
    }
}

#[derive(FromRow)]
struct PredictionRow {
    id: Uuid,
    home_team: String,
    away_team: String,
    league: String,
    match_date: String,
    match_time: String,
    category: String,
    predicted_outcome: String,
    confidence: f64,
    actual_outcome: Option<String>,
    actual_score: Option<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<PredictionRow> for Prediction {
    type Error = anyhow::Error;

    fn try_from(r: PredictionRow) -> Result<Self, Self::Error> {
        Ok(Prediction {
            id: r.id,
            home_team: r.home_team,
            away_team: r.away_team,
            league: r.league,
            match_date: r.match_date,
            match_time: r.match_time,
            category: r.category.parse()?,
            predicted_outcome: r.predicted_outcome,
            confidence: r.confidence,
            actual_outcome: r.actual_outcome,
            actual_score: r.actual_score,
            created_at: r.created_at,
        })
    }
}

impl Storage for PgStorage {
    async fn historical_results(&self) -> anyhow::Result<Vec<HistoricalResult>> {
        let rows = sqlx::query_as::<_, ResultRow>(
            "SELECT * FROM historical_results ORDER BY kickoff DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn result_exists(
        &self,
        home_team: &str,
        away_team: &str,
        league: &str,
        kickoff: DateTime<Utc>,
    ) -> anyhow::Result<bool> {
        let row: (bool,) = sqlx::query_as(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM historical_results
                WHERE home_team = $1 AND away_team = $2 AND league = $3 AND kickoff = $4
            )
            "#,
        )
        .bind(home_team)
        .bind(away_team)
        .bind(league)
        .bind(kickoff)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.0)
    }

    async fn insert_result(&self, result: &HistoricalResult) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO historical_results
                (id, home_team, away_team, league, kickoff, home_goals, away_goals, both_scored)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(result.id)
        .bind(&result.home_team)
        .bind(&result.away_team)
        .bind(&result.league)
        .bind(result.kickoff)
        .bind(result.home_goals)
        .bind(result.away_goals)
        .bind(result.both_scored)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn upcoming_exists(
        &self,
        home_team: &str,
        away_team: &str,
        league: &str,
        kickoff: &str,
    ) -> anyhow::Result<bool> {
        let row: (bool,) = sqlx::query_as(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM upcoming_matches
                WHERE home_team = $1 AND away_team = $2 AND league = $3 AND kickoff = $4
            )
            "#,
        )
        .bind(home_team)
        .bind(away_team)
        .bind(league)
        .bind(kickoff)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.0)
    }

    async fn insert_upcoming(&self, fixture: &UpcomingMatch) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO upcoming_matches
                (id, home_team, away_team, league, kickoff, signals, ingested_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(fixture.id)
        .bind(&fixture.home_team)
        .bind(&fixture.away_team)
        .bind(&fixture.league)
        .bind(&fixture.kickoff)
        .bind(Json(&fixture.signals))
        .bind(fixture.ingested_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn predictions_for_date(&self, date: &str) -> anyhow::Result<Vec<Prediction>> {
        let rows = sqlx::query_as::<_, PredictionRow>(
            "SELECT * FROM predictions WHERE match_date = $1",
        )
        .bind(date)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    async fn prediction_exists(&self, key: &PredictionKey) -> anyhow::Result<bool> {
        let row: (bool,) = sqlx::query_as(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM predictions
                WHERE home_team = $1 AND away_team = $2 AND league = $3
                  AND match_date = $4 AND category = $5
            )
            "#,
        )
        .bind(&key.home_team)
        .bind(&key.away_team)
        .bind(&key.league)
        .bind(&key.match_date)
        .bind(key.category.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(row.0)
    }

    async fn insert_prediction(&self, prediction: &Prediction) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO predictions
                (id, home_team, away_team, league, match_date, match_time,
                 category, predicted_outcome, confidence, actual_outcome,
                 actual_score, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(prediction.id)
        .bind(&prediction.home_team)
        .bind(&prediction.away_team)
        .bind(&prediction.league)
        .bind(&prediction.match_date)
        .bind(&prediction.match_time)
        .bind(prediction.category.as_str())
        .bind(&prediction.predicted_outcome)
        .bind(prediction.confidence)
        .bind(&prediction.actual_outcome)
        .bind(&prediction.actual_score)
        .bind(prediction.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn record_outcome(&self, update: &OutcomeUpdate) -> anyhow::Result<()> {
        sqlx::query(
            "UPDATE predictions SET actual_outcome = $2, actual_score = $3 WHERE id = $1",
        )
        .bind(update.prediction_id)
        .bind(&update.actual_outcome)
        .bind(&update.actual_score)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn append_audit(&self, audit: &RunAudit) -> anyhow::Result<()> {
        sqlx::query("INSERT INTO run_audits (id, at, status, message) VALUES ($1, $2, $3, $4)")
            .bind(audit.id)
            .bind(audit.at)
            .bind(audit.status.as_str())
            .bind(&audit.message)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn purge_stale_upcoming(&self, cutoff: DateTime<Utc>) -> anyhow::Result<u64> {
        let result = sqlx::query("DELETE FROM upcoming_matches WHERE ingested_at < $1")
            .bind(cutoff)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
