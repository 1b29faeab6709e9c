use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Market-implied signals attached to an upcoming fixture. A quote of 0.0
/// means the bookmaker page did not carry that line; estimator preconditions
/// treat zero as absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MarketSignals {
    #[serde(default)]
    pub home_win: f64,
    #[serde(default)]
    pub draw: f64,
    #[serde(default)]
    pub away_win: f64,
    #[serde(default)]
    pub over_two_five: f64,
    #[serde(default)]
    pub over_three: f64,
    #[serde(default)]
    pub over_four: f64,
    #[serde(default)]
    pub under_two_five: f64,
    #[serde(default)]
    pub under_three: f64,
    /// Asian-handicap-derived line, when quoted.
    #[serde(default)]
    pub asian_handicap: Option<f64>,
}

/// A scheduled fixture from the acquisition feed. Read-only input to
/// prediction generation; never mutated after ingestion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpcomingMatch {
    pub id: Uuid,
    pub home_team: String,
    pub away_team: String,
    pub league: String,
    /// Raw scheduled date/time string; normalized at prediction time.
    pub kickoff: String,
    pub signals: MarketSignals,
    pub ingested_at: DateTime<Utc>,
}

impl UpcomingMatch {
    pub fn new(
        home_team: impl Into<String>,
        away_team: impl Into<String>,
        league: impl Into<String>,
        kickoff: impl Into<String>,
        signals: MarketSignals,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            home_team: home_team.into(),
            away_team: away_team.into(),
            league: league.into(),
            kickoff: kickoff.into(),
            signals,
            ingested_at: Utc::now(),
        }
    }
}
