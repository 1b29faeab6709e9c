use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::db::Storage;
use crate::models::{HistoricalResult, Prediction, PredictionKey, RunAudit, UpcomingMatch};
use crate::reconcile::OutcomeUpdate;

#[derive(Default)]
struct Inner {
    results: Vec<HistoricalResult>,
    upcoming: Vec<UpcomingMatch>,
    predictions: Vec<Prediction>,
    audits: Vec<RunAudit>,
}

/// In-memory implementation of the storage contract. Backs the test suites
/// and dry runs; behaviorally equivalent to the Postgres implementation for
/// the equality lookups the core relies on.
#[derive(Clone, Default)]
pub struct MemoryStorage {
    inner: Arc<RwLock<Inner>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a historical result directly, bypassing the feed.
    pub async fn seed_result(&self, result: HistoricalResult) {
        self.inner.write().await.results.push(result);
    }

    pub async fn all_predictions(&self) -> Vec<Prediction> {
        self.inner.read().await.predictions.clone()
    }

    pub async fn all_upcoming(&self) -> Vec<UpcomingMatch> {
        self.inner.read().await.upcoming.clone()
    }

    pub async fn all_audits(&self) -> Vec<RunAudit> {
        self.inner.read().await.audits.clone()
    }
}

impl Storage for MemoryStorage {
    async fn historical_results(&self) -> anyhow::Result<Vec<HistoricalResult>> {
        Ok(self.inner.read().await.results.clone())
    }

    async fn result_exists(
        &self,
        home_team: &str,
        away_team: &str,
        league: &str,
        kickoff: DateTime<Utc>,
    ) -> anyhow::Result<bool> {
        Ok(self.inner.read().await.results.iter().any(|r| {
            r.home_team == home_team
                && r.away_team == away_team
                && r.league == league
                && r.kickoff == kickoff
        }))
    }

    async fn insert_result(&self, result: &HistoricalResult) -> anyhow::Result<()> {
        self.inner.write().await.results.push(result.clone());
        Ok(())
    }

    async fn upcoming_exists(
        &self,
        home_team: &str,
        away_team: &str,
        league: &str,
        kickoff: &str,
    ) -> anyhow::Result<bool> {
        Ok(self.inner.read().await.upcoming.iter().any(|m| {
            m.home_team == home_team
                && m.away_team == away_team
                && m.league == league
                && m.kickoff == kickoff
        }))
    }

    async fn insert_upcoming(&self, fixture: &UpcomingMatch) -> anyhow::Result<()> {
        self.inner.write().await.upcoming.push(fixture.clone());
        Ok(())
    }

    async fn predictions_for_date(&self, date: &str) -> anyhow::Result<Vec<Prediction>> {
        Ok(self
            .inner
            .read()
            .await
            .predictions
            .iter()
            .filter(|p| p.match_date == date)
            .cloned()
            .collect())
    }

    async fn prediction_exists(&self, key: &PredictionKey) -> anyhow::Result<bool> {
        Ok(self
            .inner
            .read()
            .await
            .predictions
            .iter()
            .any(|p| p.key() == *key))
    }

    async fn insert_prediction(&self, prediction: &Prediction) -> anyhow::Result<()> {
        self.inner.write().await.predictions.push(prediction.clone());
        Ok(())
    }

    async fn record_outcome(&self, update: &OutcomeUpdate) -> anyhow::Result<()> {
        let mut inner = self.inner.write().await;
        if let Some(p) = inner
            .predictions
            .iter_mut()
            .find(|p| p.id == update.prediction_id)
        {
            p.actual_outcome = Some(update.actual_outcome.clone());
            p.actual_score = Some(update.actual_score.clone());
        }
        Ok(())
    }

    async fn append_audit(&self, audit: &RunAudit) -> anyhow::Result<()> {
        self.inner.write().await.audits.push(audit.clone());
        Ok(())
    }

    async fn purge_stale_upcoming(&self, cutoff: DateTime<Utc>) -> anyhow::Result<u64> {
        let mut inner = self.inner.write().await;
        let before = inner.upcoming.len();
        inner.upcoming.retain(|m| m.ingested_at >= cutoff);
        Ok((before - inner.upcoming.len()) as u64)
    }
}
