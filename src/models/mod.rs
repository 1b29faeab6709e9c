pub mod audit;
pub mod prediction;
pub mod result;
pub mod upcoming;

pub use audit::{RunAudit, RunStatus};
pub use prediction::{Prediction, PredictionKey};
pub use result::{HistoricalResult, ScoredMatch};
pub use upcoming::{MarketSignals, UpcomingMatch};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ---------------------------------------------------------------------------
// Category
// ---------------------------------------------------------------------------

/// The closed set of prediction categories. Each category knows how to derive
/// its actual outcome label from a final score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    BothTeamsScore,
    Draw,
    /// Over/under on the 2.5 total-goals line.
    OverGoals,
    StraightWin,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::BothTeamsScore,
        Category::Draw,
        Category::OverGoals,
        Category::StraightWin,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::BothTeamsScore => "BothTeamsScore",
            Category::Draw => "Draw",
            Category::OverGoals => "Over2.5Goals",
            Category::StraightWin => "StraightWin",
        }
    }

    /// Derive the actual outcome label for this category from a final score.
    pub fn actual_outcome(&self, home_goals: i32, away_goals: i32) -> String {
        match self {
            Category::BothTeamsScore => {
                if home_goals > 0 && away_goals > 0 {
                    "BTTS".into()
                } else {
                    "No BTTS".into()
                }
            }
            Category::Draw => {
                if home_goals == away_goals {
                    "Draw".into()
                } else {
                    "Not Draw".into()
                }
            }
            Category::OverGoals => {
                if home_goals + away_goals > 2 {
                    "Over 2.5".into()
                } else {
                    "Under 2.5".into()
                }
            }
            Category::StraightWin => {
                if home_goals > away_goals {
                    "Home Win".into()
                } else if home_goals < away_goals {
                    "Away Win".into()
                } else {
                    "Draw".into()
                }
            }
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "BothTeamsScore" => Ok(Category::BothTeamsScore),
            "Draw" => Ok(Category::Draw),
            "Over2.5Goals" => Ok(Category::OverGoals),
            "StraightWin" => Ok(Category::StraightWin),
            other => Err(anyhow::anyhow!("unknown prediction category: {other}")),
        }
    }
}

// ---------------------------------------------------------------------------
// Sport
// ---------------------------------------------------------------------------

/// Sport detected from league-name keywords. Selects the expected-goals
/// clamp range, since scoring scales differ wildly across sports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sport {
    Football,
    Handball,
    Hockey,
    Volleyball,
}

impl Sport {
    pub fn detect(league: &str) -> Sport {
        let l = league.to_lowercase();
        if l.contains("handball") {
            Sport::Handball
        } else if l.contains("hockey") || l.contains("khl") || l.contains("sm-liiga") {
            Sport::Hockey
        } else if l.contains("volley") {
            Sport::Volleyball
        } else {
            Sport::Football
        }
    }
}

impl fmt::Display for Sport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Sport::Football => "football",
            Sport::Handball => "handball",
            Sport::Hockey => "hockey",
            Sport::Volleyball => "volleyball",
        };
        f.write_str(s)
    }
}
