use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::config::AggregationConfig;
use crate::models::HistoricalResult;

/// Per-team, venue-split, recency-weighted scoring averages. Rebuilt fresh
/// at the start of every run and discarded after use — never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct TeamVenueStatistics {
    pub home_played: u32,
    pub home_attack: f64,
    pub home_defense: f64,
    pub away_played: u32,
    pub away_attack: f64,
    pub away_defense: f64,
}

#[derive(Default)]
struct VenueAccumulator {
    played: u32,
    weight_sum: f64,
    attack_sum: f64,
    defense_sum: f64,
}

impl VenueAccumulator {
    fn add(&mut self, weight: f64, goals_for: i32, goals_against: i32) {
        self.played += 1;
        self.weight_sum += weight;
        self.attack_sum += weight * goals_for as f64;
        self.defense_sum += weight * goals_against as f64;
    }

    fn averages(&self, floor: f64) -> (f64, f64) {
        let denom = self.weight_sum.max(floor);
        (self.attack_sum / denom, self.defense_sum / denom)
    }
}

/// Consumes historical completed matches and produces per-team home/away
/// attack and defense averages with exponential recency weighting.
#[derive(Debug, Clone)]
pub struct TeamStatisticsAggregator {
    cfg: AggregationConfig,
}

impl TeamStatisticsAggregator {
    pub fn new(cfg: AggregationConfig) -> Self {
        Self { cfg }
    }

    /// Build the team → venue-statistics mapping from the full result set.
    /// Keys are lowercased team names.
    pub fn aggregate(
        &self,
        results: &[HistoricalResult],
        now: DateTime<Utc>,
    ) -> HashMap<String, TeamVenueStatistics> {
        let mut acc: HashMap<String, (VenueAccumulator, VenueAccumulator)> = HashMap::new();

        for r in results {
            let weight = self.recency_weight(r.kickoff, now);

            let home = acc.entry(r.home_team.trim().to_lowercase()).or_default();
            home.0.add(weight, r.home_goals, r.away_goals);

            let away = acc.entry(r.away_team.trim().to_lowercase()).or_default();
            away.1.add(weight, r.away_goals, r.home_goals);
        }

        acc.into_iter()
            .map(|(team, (home, away))| {
                let (home_attack, home_defense) = home.averages(self.cfg.weight_floor);
                let (away_attack, away_defense) = away.averages(self.cfg.weight_floor);
                (
                    team,
                    TeamVenueStatistics {
                        home_played: home.played,
                        home_attack,
                        home_defense,
                        away_played: away.played,
                        away_attack,
                        away_defense,
                    },
                )
            })
            .collect()
    }

    /// Look up a team's statistics, falling back to the documented defaults
    /// for teams with no history. Never an error, never zero-division.
    pub fn stats_for(
        &self,
        stats: &HashMap<String, TeamVenueStatistics>,
        team: &str,
    ) -> TeamVenueStatistics {
        stats
            .get(&team.trim().to_lowercase())
            .cloned()
            .unwrap_or_else(|| self.defaults())
    }

    pub fn defaults(&self) -> TeamVenueStatistics {
        TeamVenueStatistics {
            home_played: 0,
            home_attack: self.cfg.default_home_attack,
            home_defense: self.cfg.default_home_defense,
            away_played: 0,
            away_attack: self.cfg.default_away_attack,
            away_defense: self.cfg.default_away_defense,
        }
    }

    fn recency_weight(&self, kickoff: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
        let days_ago = (now - kickoff).num_days().max(0);
        if days_ago <= self.cfg.recency_days {
            (1.0 - self.cfg.alpha).powi(days_ago as i32)
        } else {
            self.cfg.stale_weight
        }
    }
}
