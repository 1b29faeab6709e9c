use std::fmt;

use chrono::{DateTime, Duration, Utc};
use tokio::time;

use crate::config::EngineConfig;
use crate::db::Storage;
use crate::engine::{
    date_key, fixture_probabilities, normalize_kickoff, timeparse, ConfidenceGate,
    ExpectedGoalsModel, TeamStatisticsAggregator,
};
use crate::errors::RunError;
use crate::feed::AcquisitionFeed;
use crate::models::{HistoricalResult, RunAudit, ScoredMatch, Sport, UpcomingMatch};
use crate::reconcile::OutcomeReconciler;

/// Stages of one orchestration run. `Failed` is absorbing and reachable from
/// every stage except the final audit writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStage {
    Idle,
    Acquiring,
    FetchingScores,
    Aggregating,
    Predicting,
    Reconciling,
    AuditLogging,
    Failed,
}

impl RunStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunStage::Idle => "idle",
            RunStage::Acquiring => "acquiring",
            RunStage::FetchingScores => "fetching-scores",
            RunStage::Aggregating => "aggregating",
            RunStage::Predicting => "predicting",
            RunStage::Reconciling => "reconciling",
            RunStage::AuditLogging => "audit-logging",
            RunStage::Failed => "failed",
        }
    }
}

impl fmt::Display for RunStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Counters for one completed run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub fixtures_seen: usize,
    pub predictions_emitted: usize,
    pub results_ingested: usize,
    pub outcomes_recorded: usize,
    pub upcoming_purged: u64,
    /// True when the scores feed failed or timed out and the run continued
    /// on previously known scores only.
    pub scores_degraded: bool,
}

impl RunSummary {
    fn message(&self) -> String {
        format!(
            "fixtures={} predictions={} results={} outcomes={} purged={}{}",
            self.fixtures_seen,
            self.predictions_emitted,
            self.results_ingested,
            self.outcomes_recorded,
            self.upcoming_purged,
            if self.scores_degraded {
                " (scores feed degraded)"
            } else {
                ""
            }
        )
    }
}

type StageResult<T> = Result<T, (RunStage, anyhow::Error)>;

/// Sequences acquisition → aggregation → prediction → reconciliation →
/// audit logging for one day's fixtures. Designed for single-run sequential
/// execution; the external scheduler guarantees at most one concurrent run.
pub struct RunOrchestrator<S, F> {
    storage: S,
    feed: F,
    cfg: EngineConfig,
    scores_timeout: time::Duration,
    aggregator: TeamStatisticsAggregator,
    xg_model: ExpectedGoalsModel,
    gate: ConfidenceGate,
    reconciler: OutcomeReconciler,
}

impl<S: Storage, F: AcquisitionFeed> RunOrchestrator<S, F> {
    pub fn new(storage: S, feed: F, cfg: EngineConfig, scores_timeout: time::Duration) -> Self {
        let aggregator = TeamStatisticsAggregator::new(cfg.aggregation.clone());
        let xg_model = ExpectedGoalsModel::new(cfg.expected_goals.clone());
        let gate = ConfidenceGate::new(cfg.gate.clone());
        let reconciler = OutcomeReconciler::new(cfg.matching.clone());
        Self {
            storage,
            feed,
            cfg,
            scores_timeout,
            aggregator,
            xg_model,
            gate,
            reconciler,
        }
    }

    /// The single entry point: run once, now.
    pub async fn run_once(&self) -> Result<RunSummary, RunError> {
        self.run_at(Utc::now()).await
    }

    /// Run with an explicit reference instant. Everything downstream derives
    /// from this one "now": recency windows, the reconciliation date key,
    /// the retention cutoff.
    pub async fn run_at(&self, now: DateTime<Utc>) -> Result<RunSummary, RunError> {
        // Acquiring: mandatory. Failure aborts the run, records it, and
        // re-raises so the scheduler's retry policy can act.
        tracing::info!(stage = %RunStage::Acquiring, "Run started");
        let fixtures = match self.feed.fetch_upcoming().await {
            Ok(f) => f,
            Err(e) => {
                tracing::error!(stage = %RunStage::Failed, error = %e, "Upcoming-match acquisition failed");
                self.append_failed_audit(&format!("acquisition: {e}")).await;
                return Err(RunError::Acquisition(e));
            }
        };
        tracing::info!(fixtures = fixtures.len(), "Upcoming fixtures acquired");

        match self.execute(now, fixtures).await {
            Ok(summary) => {
                // AuditLogging: one Success record per run. A failure here
                // has no Failed audit of its own; the error just propagates.
                tracing::info!(stage = %RunStage::AuditLogging, summary = %summary.message(), "Run complete");
                self.storage
                    .append_audit(&RunAudit::success(summary.message()))
                    .await
                    .map_err(|e| RunError::stage("audit-logging", e))?;
                Ok(summary)
            }
            Err((stage, e)) => {
                tracing::error!(stage = %stage, error = %e, "Run failed");
                self.append_failed_audit(&format!("{stage}: {e}")).await;
                Err(RunError::stage(stage.as_str(), e))
            }
        }
    }

    async fn execute(
        &self,
        now: DateTime<Utc>,
        fixtures: Vec<UpcomingMatch>,
    ) -> StageResult<RunSummary> {
        let mut summary = RunSummary {
            fixtures_seen: fixtures.len(),
            ..Default::default()
        };

        // FetchingScores: best-effort, bounded by a timeout. Predictions are
        // produced even when live scores are unavailable.
        tracing::info!(stage = %RunStage::FetchingScores, "Fetching final scores");
        let fresh_scores = match time::timeout(self.scores_timeout, self.feed.fetch_scores()).await
        {
            Ok(Ok(scores)) => {
                tracing::info!(scores = scores.len(), "Final scores acquired");
                scores
            }
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "Scores feed failed; continuing on stored scores");
                summary.scores_degraded = true;
                Vec::new()
            }
            Err(_) => {
                tracing::warn!(
                    timeout_secs = self.scores_timeout.as_secs(),
                    "Scores feed timed out; continuing on stored scores"
                );
                summary.scores_degraded = true;
                Vec::new()
            }
        };

        // Persist acquired records, idempotently.
        self.ingest_fixtures(&fixtures)
            .await
            .map_err(|e| (RunStage::Acquiring, e))?;
        summary.results_ingested = self
            .ingest_results(&fresh_scores)
            .await
            .map_err(|e| (RunStage::Acquiring, e))?;

        // Aggregating: rebuild venue statistics fresh from persisted history.
        tracing::info!(stage = %RunStage::Aggregating, "Aggregating team statistics");
        let history = self
            .storage
            .historical_results()
            .await
            .map_err(|e| (RunStage::Aggregating, e))?;
        let stats = self.aggregator.aggregate(&history, now);
        tracing::info!(teams = stats.len(), results = history.len(), "Statistics built");

        // Predicting: pure computation per fixture, gated, upserted.
        tracing::info!(stage = %RunStage::Predicting, "Generating predictions");
        for fixture in &fixtures {
            summary.predictions_emitted += self
                .predict_fixture(fixture, &stats)
                .await
                .map_err(|e| (RunStage::Predicting, e))?;
        }

        // Reconciling: stamp actual outcomes on today's predictions.
        tracing::info!(stage = %RunStage::Reconciling, "Reconciling final scores");
        let today = date_key(now.date_naive());
        let completed = if fresh_scores.is_empty() {
            self.stored_scores_for(&history, &today)
        } else {
            fresh_scores
                .iter()
                .filter(|s| {
                    normalize_kickoff(&s.kickoff).map(|k| k.date).as_deref() == Some(today.as_str())
                })
                .cloned()
                .collect()
        };
        let todays_predictions = self
            .storage
            .predictions_for_date(&today)
            .await
            .map_err(|e| (RunStage::Reconciling, e))?;
        let updates = self.reconciler.reconcile(&completed, &todays_predictions);
        for update in &updates {
            self.storage
                .record_outcome(update)
                .await
                .map_err(|e| (RunStage::Reconciling, e))?;
        }
        summary.outcomes_recorded = updates.len();

        // Retention sweep: stale upcoming fixtures only.
        let cutoff = now - Duration::days(self.cfg.retention.upcoming_max_age_days);
        summary.upcoming_purged = self
            .storage
            .purge_stale_upcoming(cutoff)
            .await
            .map_err(|e| (RunStage::Reconciling, e))?;

        Ok(summary)
    }

    async fn ingest_fixtures(&self, fixtures: &[UpcomingMatch]) -> anyhow::Result<()> {
        for fixture in fixtures {
            let exists = self
                .storage
                .upcoming_exists(
                    &fixture.home_team,
                    &fixture.away_team,
                    &fixture.league,
                    &fixture.kickoff,
                )
                .await?;
            if !exists {
                self.storage.insert_upcoming(fixture).await?;
            }
        }
        Ok(())
    }

    /// Parse and upsert fresh final scores as historical results. Unparseable
    /// records are skipped, never fatal.
    async fn ingest_results(&self, scores: &[ScoredMatch]) -> anyhow::Result<usize> {
        let mut ingested = 0;

        for scored in scores {
            let Some((home_goals, away_goals)) = crate::reconcile::score::parse_score(&scored.score)
            else {
                tracing::debug!(score = %scored.score, "Unparseable final score, record skipped");
                continue;
            };
            let Some(kickoff) = timeparse::parse_kickoff(&scored.kickoff) else {
                tracing::debug!(kickoff = %scored.kickoff, "Unparseable kickoff, record skipped");
                continue;
            };
            let kickoff = kickoff.and_utc();
            let league = scored.league.clone().unwrap_or_default();

            let exists = self
                .storage
                .result_exists(&scored.home_team, &scored.away_team, &league, kickoff)
                .await?;
            if exists {
                continue;
            }

            let result = HistoricalResult::new(
                scored.home_team.clone(),
                scored.away_team.clone(),
                league,
                kickoff,
                home_goals,
                away_goals,
            );
            self.storage.insert_result(&result).await?;
            ingested += 1;
        }

        Ok(ingested)
    }

    /// Score one fixture and upsert whatever clears the gate. Returns the
    /// number of newly stored predictions.
    async fn predict_fixture(
        &self,
        fixture: &UpcomingMatch,
        stats: &std::collections::HashMap<String, crate::engine::TeamVenueStatistics>,
    ) -> anyhow::Result<usize> {
        let Some(kickoff) = normalize_kickoff(&fixture.kickoff) else {
            tracing::debug!(
                home_team = %fixture.home_team,
                kickoff = %fixture.kickoff,
                "Unparseable kickoff, fixture skipped"
            );
            return Ok(0);
        };

        let home = self.aggregator.stats_for(stats, &fixture.home_team);
        let away = self.aggregator.stats_for(stats, &fixture.away_team);
        let sport = Sport::detect(&fixture.league);
        let xg = self.xg_model.expected_goals(&home, &away, sport);
        let probs = fixture_probabilities(xg.home, xg.away);

        tracing::debug!(
            home_team = %fixture.home_team,
            away_team = %fixture.away_team,
            sport = %sport,
            lambda_home = xg.home,
            lambda_away = xg.away,
            "Fixture scored"
        );

        let mut emitted = 0;
        for candidate in self.gate.candidates(fixture, &probs, &kickoff) {
            if self.storage.prediction_exists(&candidate.key()).await? {
                tracing::debug!(
                    home_team = %candidate.home_team,
                    category = %candidate.category,
                    "Prediction already stored, skipping"
                );
                continue;
            }
            self.storage.insert_prediction(&candidate).await?;
            emitted += 1;
        }
        Ok(emitted)
    }

    /// Rebuild completed-match records for the reconciliation date from
    /// stored history, for runs where the scores feed was unavailable.
    fn stored_scores_for(&self, history: &[HistoricalResult], date: &str) -> Vec<ScoredMatch> {
        history
            .iter()
            .filter(|r| date_key((r.kickoff + Duration::hours(1)).date_naive()) == date)
            .map(|r| ScoredMatch {
                home_team: r.home_team.clone(),
                away_team: r.away_team.clone(),
                league: if r.league.is_empty() {
                    None
                } else {
                    Some(r.league.clone())
                },
                kickoff: r.kickoff.format("%Y-%m-%d %H:%M").to_string(),
                score: r.score_string(),
            })
            .collect()
    }

    async fn append_failed_audit(&self, message: &str) {
        if let Err(e) = self.storage.append_audit(&RunAudit::failed(message)).await {
            tracing::error!(error = %e, "Failed to append Failed audit record");
        }
    }
}
