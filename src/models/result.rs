use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A completed match with a parsed final score. Immutable once recorded; the
/// sole input to statistics aggregation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoricalResult {
    pub id: Uuid,
    pub home_team: String,
    pub away_team: String,
    pub league: String,
    pub kickoff: DateTime<Utc>,
    pub home_goals: i32,
    pub away_goals: i32,
    pub both_scored: bool,
}

impl HistoricalResult {
    pub fn new(
        home_team: impl Into<String>,
        away_team: impl Into<String>,
        league: impl Into<String>,
        kickoff: DateTime<Utc>,
        home_goals: i32,
        away_goals: i32,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            home_team: home_team.into(),
            away_team: away_team.into(),
            league: league.into(),
            kickoff,
            home_goals,
            away_goals,
            both_scored: home_goals > 0 && away_goals > 0,
        }
    }

    /// Final score in the canonical `H:A` form used on stored predictions.
    pub fn score_string(&self) -> String {
        format!("{}:{}", self.home_goals, self.away_goals)
    }
}

/// A raw completed-match record as delivered by the scores feed. The score is
/// an unparsed string; kickoff is whatever the upstream page printed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredMatch {
    pub home_team: String,
    pub away_team: String,
    #[serde(default)]
    pub league: Option<String>,
    pub kickoff: String,
    pub score: String,
}
