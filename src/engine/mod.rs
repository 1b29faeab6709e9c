pub mod aggregator;
pub mod estimators;
pub mod expected_goals;
pub mod gate;
pub mod poisson;
pub mod timeparse;

pub use aggregator::{TeamStatisticsAggregator, TeamVenueStatistics};
pub use expected_goals::{ExpectedGoals, ExpectedGoalsModel};
pub use gate::ConfidenceGate;
pub use poisson::{fixture_probabilities, FixtureProbabilities};
pub use timeparse::{date_key, normalize_kickoff, NormalizedKickoff, DATE_KEY_FORMAT};
