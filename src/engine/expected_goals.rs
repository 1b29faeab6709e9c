use crate::config::ExpectedGoalsConfig;
use crate::engine::aggregator::TeamVenueStatistics;
use crate::models::Sport;

/// Expected-goals pair for a fixture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExpectedGoals {
    pub home: f64,
    pub away: f64,
}

/// Blends each side's venue-specific attack average with the opponent's
/// venue-specific defense average, applies the home-advantage multiplier,
/// and clamps to sport-specific bounds. Raw weighted averages can diverge
/// for teams with little or noisy history; the clamp keeps the Poisson stage
/// numerically sane across sports with very different scoring scales.
#[derive(Debug, Clone)]
pub struct ExpectedGoalsModel {
    cfg: ExpectedGoalsConfig,
}

impl ExpectedGoalsModel {
    pub fn new(cfg: ExpectedGoalsConfig) -> Self {
        Self { cfg }
    }

    pub fn expected_goals(
        &self,
        home: &TeamVenueStatistics,
        away: &TeamVenueStatistics,
        sport: Sport,
    ) -> ExpectedGoals {
        let (lo, hi) = self.cfg.bounds_for(sport);

        let raw_home = (self.cfg.attack_weight * home.home_attack
            + self.cfg.defense_weight * away.away_defense)
            * self.cfg.home_advantage;
        let raw_away =
            self.cfg.attack_weight * away.away_attack + self.cfg.defense_weight * home.home_defense;

        ExpectedGoals {
            home: raw_home.clamp(lo, hi),
            away: raw_away.clamp(lo, hi),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(ha: f64, hd: f64, aa: f64, ad: f64) -> TeamVenueStatistics {
        TeamVenueStatistics {
            home_played: 5,
            home_attack: ha,
            home_defense: hd,
            away_played: 5,
            away_attack: aa,
            away_defense: ad,
        }
    }

    #[test]
    fn test_home_advantage_applies_only_to_home_side() {
        let model = ExpectedGoalsModel::new(ExpectedGoalsConfig::default());
        // Symmetric teams: identical venue profiles.
        let a = stats(1.5, 1.2, 1.5, 1.2);
        let b = stats(1.5, 1.2, 1.5, 1.2);
        let xg = model.expected_goals(&a, &b, Sport::Football);
        let blend = 0.6 * 1.5 + 0.4 * 1.2;
        assert!((xg.home - blend * 1.15).abs() < 1e-9);
        assert!((xg.away - blend).abs() < 1e-9);
        assert!(xg.home > xg.away);
    }

    #[test]
    fn test_football_clamp_bounds() {
        let model = ExpectedGoalsModel::new(ExpectedGoalsConfig::default());
        let monster = stats(30.0, 0.0, 30.0, 0.0);
        let minnow = stats(0.0, 0.0, 0.0, 0.0);
        let xg = model.expected_goals(&monster, &minnow, Sport::Football);
        assert_eq!(xg.home, 4.0);
        assert_eq!(xg.away, 0.15);
    }

    #[test]
    fn test_volleyball_scale_is_honoured() {
        let model = ExpectedGoalsModel::new(ExpectedGoalsConfig::default());
        let a = stats(1.5, 1.2, 1.0, 1.5);
        let b = stats(1.5, 1.2, 1.0, 1.5);
        let xg = model.expected_goals(&a, &b, Sport::Volleyball);
        // Football-scale averages get lifted to the volleyball floor.
        assert_eq!(xg.home, 20.0);
        assert_eq!(xg.away, 20.0);
    }

    #[test]
    fn test_defense_leaks_raise_opponent_expectation() {
        let model = ExpectedGoalsModel::new(ExpectedGoalsConfig::default());
        let attack = stats(1.5, 1.2, 1.0, 1.5);
        let leaky = stats(1.5, 1.2, 1.0, 3.0);
        let tight = stats(1.5, 1.2, 1.0, 0.5);
        let vs_leaky = model.expected_goals(&attack, &leaky, Sport::Football);
        let vs_tight = model.expected_goals(&attack, &tight, Sport::Football);
        assert!(vs_leaky.home > vs_tight.home);
    }
}
