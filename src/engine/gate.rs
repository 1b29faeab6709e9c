use chrono::Utc;
use uuid::Uuid;

use crate::config::GateConfig;
use crate::engine::estimators;
use crate::engine::poisson::FixtureProbabilities;
use crate::engine::timeparse::NormalizedKickoff;
use crate::models::{Category, Prediction, UpcomingMatch};

/// Applies the per-category emission thresholds and builds prediction
/// candidates. A category below its threshold is simply omitted for the
/// fixture — absence, not an error. The exists-check upsert happens in the
/// orchestrator against the storage collaborator.
#[derive(Debug, Clone)]
pub struct ConfidenceGate {
    cfg: GateConfig,
}

impl ConfidenceGate {
    pub fn new(cfg: GateConfig) -> Self {
        Self { cfg }
    }

    pub fn candidates(
        &self,
        fixture: &UpcomingMatch,
        probs: &FixtureProbabilities,
        kickoff: &NormalizedKickoff,
    ) -> Vec<Prediction> {
        let mut out = Vec::new();

        if probs.over_two_five >= self.cfg.over_goals {
            out.push(self.build(fixture, kickoff, Category::OverGoals, "Over 2.5", probs.over_two_five));
        }

        if probs.both_teams_score >= self.cfg.both_teams_score {
            out.push(self.build(
                fixture,
                kickoff,
                Category::BothTeamsScore,
                "BTTS",
                probs.both_teams_score,
            ));
        }

        if probs.draw >= self.cfg.draw {
            out.push(self.build(fixture, kickoff, Category::Draw, "Draw", probs.draw));
        }

        // Straight win gates on whichever side is larger; the winning side's
        // label is chosen by the comparison.
        let (label, win_prob) = if probs.home_win >= probs.away_win {
            ("Home Win", probs.home_win)
        } else {
            ("Away Win", probs.away_win)
        };
        if win_prob >= self.cfg.straight_win {
            out.push(self.build(fixture, kickoff, Category::StraightWin, label, win_prob));
        }

        self.log_market_edge(fixture, probs);

        out
    }

    fn build(
        &self,
        fixture: &UpcomingMatch,
        kickoff: &NormalizedKickoff,
        category: Category,
        outcome: &str,
        probability: f64,
    ) -> Prediction {
        Prediction {
            id: Uuid::new_v4(),
            home_team: fixture.home_team.clone(),
            away_team: fixture.away_team.clone(),
            league: fixture.league.clone(),
            match_date: kickoff.date.clone(),
            match_time: kickoff.time.clone(),
            category,
            predicted_outcome: outcome.into(),
            confidence: round3(probability),
            actual_outcome: None,
            actual_score: None,
            created_at: Utc::now(),
        }
    }

    /// Model-vs-market diagnostics. Never changes what gets emitted.
    fn log_market_edge(&self, fixture: &UpcomingMatch, probs: &FixtureProbabilities) {
        let over = estimators::implied_over_two_five(&fixture.signals);
        let home = estimators::implied_home_win(&fixture.signals);
        tracing::debug!(
            home_team = %fixture.home_team,
            away_team = %fixture.away_team,
            over_estimator = over.estimator,
            over_edge = probs.over_two_five - over.value,
            home_win_estimator = home.estimator,
            home_win_edge = probs.home_win - home.value,
            "Model vs market edge"
        );
    }
}

fn round3(p: f64) -> f64 {
    (p * 1000.0).round() / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MarketSignals;

    fn fixture() -> UpcomingMatch {
        UpcomingMatch::new(
            "Al Nassr",
            "Al-Hilal",
            "Saudi Pro League",
            "21.03.2026 18:30",
            MarketSignals::default(),
        )
    }

    fn kickoff() -> NormalizedKickoff {
        NormalizedKickoff {
            date: "21-03-2026".into(),
            time: "19:30".into(),
        }
    }

    fn gate() -> ConfidenceGate {
        ConfidenceGate::new(GateConfig::default())
    }

    fn probs(over: f64, btts: f64, draw: f64, home: f64) -> FixtureProbabilities {
        FixtureProbabilities {
            over_two_five: over,
            both_teams_score: btts,
            draw,
            home_win: home,
            away_win: 1.0 - home,
        }
    }

    #[test]
    fn test_all_categories_clear_thresholds() {
        let out = gate().candidates(&fixture(), &probs(0.61, 0.55, 0.26, 0.58), &kickoff());
        let cats: Vec<Category> = out.iter().map(|p| p.category).collect();
        assert_eq!(out.len(), 4);
        assert!(cats.contains(&Category::OverGoals));
        assert!(cats.contains(&Category::BothTeamsScore));
        assert!(cats.contains(&Category::Draw));
        assert!(cats.contains(&Category::StraightWin));
    }

    #[test]
    fn test_below_threshold_categories_are_omitted() {
        let out = gate().candidates(&fixture(), &probs(0.49, 0.499, 0.24, 0.52), &kickoff());
        assert!(out.is_empty());
    }

    #[test]
    fn test_draw_threshold_is_lower() {
        let out = gate().candidates(&fixture(), &probs(0.0, 0.0, 0.26, 0.5), &kickoff());
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].category, Category::Draw);
        assert_eq!(out[0].predicted_outcome, "Draw");
    }

    #[test]
    fn test_straight_win_picks_larger_side() {
        let p = FixtureProbabilities {
            over_two_five: 0.0,
            both_teams_score: 0.0,
            draw: 0.0,
            home_win: 0.40,
            away_win: 0.60,
        };
        let out = gate().candidates(&fixture(), &p, &kickoff());
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].predicted_outcome, "Away Win");
        assert_eq!(out[0].confidence, 0.6);
    }

    #[test]
    fn test_confidence_rounded_to_three_decimals() {
        let out = gate().candidates(&fixture(), &probs(0.612345, 0.0, 0.0, 0.5), &kickoff());
        assert_eq!(out[0].confidence, 0.612);
    }

    #[test]
    fn test_normalized_kickoff_is_attached() {
        let out = gate().candidates(&fixture(), &probs(0.61, 0.0, 0.0, 0.5), &kickoff());
        assert_eq!(out[0].match_date, "21-03-2026");
        assert_eq!(out[0].match_time, "19:30");
    }
}
