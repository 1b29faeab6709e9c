use std::env;

use crate::models::Sport;

const DEFAULT_FEED_URL: &str = "http://localhost:9100";

/// Runtime wiring read from the environment. Model constants live in
/// [`EngineConfig`], not here.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub feed_base_url: String,
    /// Hard timeout on the best-effort final-scores fetch.
    pub scores_timeout_secs: u64,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            database_url: env::var("DATABASE_URL")
                .map_err(|_| anyhow::anyhow!("DATABASE_URL must be set"))?,
            feed_base_url: env::var("FEED_BASE_URL").unwrap_or_else(|_| DEFAULT_FEED_URL.into()),
            scores_timeout_secs: env::var("SCORES_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".into())
                .parse()
                .unwrap_or(30),
        })
    }
}

// ---------------------------------------------------------------------------
// Engine configuration
// ---------------------------------------------------------------------------

/// Recency-weighted aggregation constants.
#[derive(Debug, Clone)]
pub struct AggregationConfig {
    /// EWMA decay: weight = (1 - alpha)^days_ago inside the recency window.
    pub alpha: f64,
    /// Window length in days. Matches older than this get `stale_weight`.
    pub recency_days: i64,
    /// Flat weight for matches outside the window. Old matches still count,
    /// heavily discounted, so sparse teams keep coverage.
    pub stale_weight: f64,
    /// Floor on the weight sum, so one very recent match cannot produce an
    /// extreme average.
    pub weight_floor: f64,
    pub default_home_attack: f64,
    pub default_home_defense: f64,
    pub default_away_attack: f64,
    pub default_away_defense: f64,
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            alpha: 0.4,
            recency_days: 30,
            stale_weight: 0.1,
            weight_floor: 0.5,
            default_home_attack: 1.5,
            default_home_defense: 1.2,
            default_away_attack: 1.0,
            default_away_defense: 1.5,
        }
    }
}

/// Expected-goals blend weights, home advantage, and per-sport clamps.
#[derive(Debug, Clone)]
pub struct ExpectedGoalsConfig {
    pub attack_weight: f64,
    pub defense_weight: f64,
    pub home_advantage: f64,
    pub football_bounds: (f64, f64),
    pub handball_bounds: (f64, f64),
    pub hockey_bounds: (f64, f64),
    pub volleyball_bounds: (f64, f64),
}

impl ExpectedGoalsConfig {
    pub fn bounds_for(&self, sport: Sport) -> (f64, f64) {
        match sport {
            Sport::Football => self.football_bounds,
            Sport::Handball => self.handball_bounds,
            Sport::Hockey => self.hockey_bounds,
            Sport::Volleyball => self.volleyball_bounds,
        }
    }
}

impl Default for ExpectedGoalsConfig {
    fn default() -> Self {
        Self {
            attack_weight: 0.6,
            defense_weight: 0.4,
            home_advantage: 1.15,
            football_bounds: (0.15, 4.0),
            handball_bounds: (0.5, 15.0),
            hockey_bounds: (0.2, 4.0),
            volleyball_bounds: (20.0, 50.0),
        }
    }
}

/// Per-category emission thresholds.
#[derive(Debug, Clone)]
pub struct GateConfig {
    pub over_goals: f64,
    pub both_teams_score: f64,
    pub straight_win: f64,
    /// Intentionally lower: draws are structurally less probable, so a lower
    /// bar surfaces a usable signal volume.
    pub draw: f64,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            over_goals: 0.50,
            both_teams_score: 0.50,
            straight_win: 0.55,
            draw: 0.25,
        }
    }
}

/// Fuzzy-matching thresholds for outcome reconciliation.
#[derive(Debug, Clone)]
pub struct MatchingConfig {
    /// Minimum token-overlap ratio for team names.
    pub team_overlap: f64,
    /// Minimum token-overlap ratio for league names.
    pub league_overlap: f64,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            team_overlap: 0.70,
            league_overlap: 0.60,
        }
    }
}

/// All model constants, passed into each component at construction so tests
/// can vary them without global state.
#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    pub aggregation: AggregationConfig,
    pub expected_goals: ExpectedGoalsConfig,
    pub gate: GateConfig,
    pub matching: MatchingConfig,
    pub retention: RetentionConfig,
}

/// Retention policy for stale upcoming fixtures. Predictions and historical
/// results are never swept.
#[derive(Debug, Clone)]
pub struct RetentionConfig {
    pub upcoming_max_age_days: i64,
}

impl Default for RetentionConfig {
    fn default() -> Self {
        Self {
            upcoming_max_age_days: 7,
        }
    }
}
