pub mod fuzzy;
pub mod score;

use uuid::Uuid;

use crate::config::MatchingConfig;
use crate::models::{Prediction, ScoredMatch};

/// An actual-outcome stamp for one stored prediction. Applied by the
/// orchestrator through the storage contract.
#[derive(Debug, Clone, PartialEq)]
pub struct OutcomeUpdate {
    pub prediction_id: Uuid,
    pub actual_outcome: String,
    pub actual_score: String,
}

/// Links completed-match final scores back to previously stored predictions
/// despite inconsistent team and league naming: exact normalized-key lookup
/// first, word-overlap fuzzy matching as the fallback.
#[derive(Debug, Clone)]
pub struct OutcomeReconciler {
    cfg: MatchingConfig,
}

impl OutcomeReconciler {
    pub fn new(cfg: MatchingConfig) -> Self {
        Self { cfg }
    }

    /// Reconcile one day's completed matches against that day's stored
    /// predictions. Zero matches for a score is a debug-logged skip.
    pub fn reconcile(
        &self,
        completed: &[ScoredMatch],
        predictions: &[Prediction],
    ) -> Vec<OutcomeUpdate> {
        let mut updates = Vec::new();

        for scored in completed {
            let candidates = self.match_predictions(scored, predictions);
            if candidates.is_empty() {
                tracing::debug!(
                    home_team = %scored.home_team,
                    away_team = %scored.away_team,
                    "No stored predictions match this final score"
                );
                continue;
            }

            for prediction in candidates {
                updates.push(self.stamp(prediction, scored));
            }
        }

        updates
    }

    /// Candidate predictions for a final score: exact normalized team key,
    /// else fuzzy team matching; ambiguous fuzzy sets are narrowed by league
    /// when the score carries one and narrowing leaves at least one result.
    pub fn match_predictions<'a>(
        &self,
        scored: &ScoredMatch,
        predictions: &'a [Prediction],
    ) -> Vec<&'a Prediction> {
        let exact_key = format!(
            "{}|{}",
            scored.home_team.trim().to_lowercase(),
            scored.away_team.trim().to_lowercase()
        );

        let exact: Vec<&Prediction> = predictions
            .iter()
            .filter(|p| p.team_key() == exact_key)
            .collect();
        if !exact.is_empty() {
            return exact;
        }

        let mut matched: Vec<&Prediction> = predictions
            .iter()
            .filter(|p| {
                fuzzy::teams_match(&p.home_team, &scored.home_team, self.cfg.team_overlap)
                    && fuzzy::teams_match(&p.away_team, &scored.away_team, self.cfg.team_overlap)
            })
            .collect();

        if matched.len() > 1 {
            if let Some(league) = scored.league.as_deref() {
                let narrowed: Vec<&Prediction> = matched
                    .iter()
                    .copied()
                    .filter(|p| fuzzy::leagues_match(&p.league, league, self.cfg.league_overlap))
                    .collect();
                if !narrowed.is_empty() {
                    matched = narrowed;
                }
            }
        }

        matched
    }

    fn stamp(&self, prediction: &Prediction, scored: &ScoredMatch) -> OutcomeUpdate {
        match score::parse_score(&scored.score) {
            Some((home, away)) => OutcomeUpdate {
                prediction_id: prediction.id,
                actual_outcome: prediction.category.actual_outcome(home, away),
                actual_score: format!("{home}:{away}"),
            },
            None => OutcomeUpdate {
                prediction_id: prediction.id,
                actual_outcome: "Unknown".into(),
                actual_score: scored.score.trim().to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;
    use chrono::Utc;

    fn prediction(home: &str, away: &str, league: &str, category: Category) -> Prediction {
        Prediction {
            id: Uuid::new_v4(),
            home_team: home.into(),
            away_team: away.into(),
            league: league.into(),
            match_date: "21-03-2026".into(),
            match_time: "19:30".into(),
            category,
            predicted_outcome: "Home Win".into(),
            confidence: 0.6,
            actual_outcome: None,
            actual_score: None,
            created_at: Utc::now(),
        }
    }

    fn scored(home: &str, away: &str, league: Option<&str>, score: &str) -> ScoredMatch {
        ScoredMatch {
            home_team: home.into(),
            away_team: away.into(),
            league: league.map(Into::into),
            kickoff: "21.03.2026 18:30".into(),
            score: score.into(),
        }
    }

    fn reconciler() -> OutcomeReconciler {
        OutcomeReconciler::new(MatchingConfig::default())
    }

    #[test]
    fn test_exact_key_match_wins() {
        let preds = vec![prediction("Al Nassr", "Al Hilal", "Saudi Pro League", Category::StraightWin)];
        let updates = reconciler().reconcile(
            &[scored("  al nassr ", "AL HILAL", None, "2:1")],
            &preds,
        );
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].actual_outcome, "Home Win");
        assert_eq!(updates[0].actual_score, "2:1");
    }

    #[test]
    fn test_fuzzy_fallback_handles_hyphenation() {
        let preds = vec![prediction("Al Nassr", "Al-Hilal", "Saudi Pro League", Category::StraightWin)];
        let updates = reconciler().reconcile(
            &[scored("Al-Nassr", "Al Hilal", None, "2:1")],
            &preds,
        );
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].actual_outcome, "Home Win");
    }

    #[test]
    fn test_unrelated_score_is_skipped() {
        let preds = vec![prediction("Arsenal", "Chelsea", "Premier League", Category::Draw)];
        let updates = reconciler().reconcile(
            &[scored("Liverpool", "Everton", None, "1:1")],
            &preds,
        );
        assert!(updates.is_empty());
    }

    #[test]
    fn test_league_narrows_ambiguous_fuzzy_matches() {
        let cup = prediction("Celtic", "Rangers", "Scottish Cup", Category::StraightWin);
        let league = prediction("Celtic", "Rangers FC", "Premiership", Category::StraightWin);
        let preds = vec![cup.clone(), league.clone()];
        let updates = reconciler().reconcile(
            &[scored("Celtic FC", "Rangers", Some("Scottish Cup Round"), "3:0")],
            &preds,
        );
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].prediction_id, cup.id);
    }

    #[test]
    fn test_failed_narrowing_keeps_candidate_set() {
        let a = prediction("Celtic", "Rangers", "Scottish Cup", Category::StraightWin);
        let b = prediction("Celtic", "Rangers FC", "Premiership", Category::StraightWin);
        let preds = vec![a, b];
        // League on the score matches neither stored league; the wider set
        // survives rather than collapsing to zero.
        let updates = reconciler().reconcile(
            &[scored("Celtic FC", "Rangers", Some("Bundesliga"), "3:0")],
            &preds,
        );
        assert_eq!(updates.len(), 2);
    }

    #[test]
    fn test_every_category_is_stamped() {
        let preds = vec![
            prediction("A", "B", "L", Category::BothTeamsScore),
            prediction("A", "B", "L", Category::Draw),
            prediction("A", "B", "L", Category::OverGoals),
            prediction("A", "B", "L", Category::StraightWin),
        ];
        let updates = reconciler().reconcile(&[scored("A", "B", None, "2 - 1")], &preds);
        let outcomes: Vec<&str> = updates.iter().map(|u| u.actual_outcome.as_str()).collect();
        assert_eq!(outcomes, vec!["BTTS", "Not Draw", "Over 2.5", "Home Win"]);
        assert!(updates.iter().all(|u| u.actual_score == "2:1"));
    }

    #[test]
    fn test_unparseable_score_stamps_unknown() {
        let preds = vec![prediction("A", "B", "L", Category::Draw)];
        let updates = reconciler().reconcile(&[scored("A", "B", None, "postponed")], &preds);
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].actual_outcome, "Unknown");
        assert_eq!(updates[0].actual_score, "postponed");
    }
}
