use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Category;

/// The natural identity of a prediction. At most one stored prediction per
/// key; re-running on the same inputs must converge, not duplicate.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PredictionKey {
    pub home_team: String,
    pub away_team: String,
    pub league: String,
    /// Match date in the shared `dd-MM-yyyy` key format.
    pub match_date: String,
    pub category: Category,
}

/// An emitted prediction. The actual-outcome fields start empty and are
/// stamped by reconciliation once the final score is known.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prediction {
    pub id: Uuid,
    pub home_team: String,
    pub away_team: String,
    pub league: String,
    pub match_date: String,
    pub match_time: String,
    pub category: Category,
    pub predicted_outcome: String,
    /// Model probability for the predicted outcome, rounded to 3 decimals.
    pub confidence: f64,
    pub actual_outcome: Option<String>,
    pub actual_score: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Prediction {
    pub fn key(&self) -> PredictionKey {
        PredictionKey {
            home_team: self.home_team.clone(),
            away_team: self.away_team.clone(),
            league: self.league.clone(),
            match_date: self.match_date.clone(),
            category: self.category,
        }
    }

    /// Normalized team-name pair used for the exact reconciliation lookup.
    pub fn team_key(&self) -> String {
        format!(
            "{}|{}",
            self.home_team.trim().to_lowercase(),
            self.away_team.trim().to_lowercase()
        )
    }
}
