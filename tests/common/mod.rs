use chrono::{DateTime, Duration, TimeZone, Utc};

use goalcast::feed::AcquisitionFeed;
use goalcast::models::{HistoricalResult, MarketSignals, ScoredMatch, UpcomingMatch};

/// Fixed reference instant used by the suites: 2026-03-21 12:00 UTC.
#[allow(dead_code)]
pub fn run_instant() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 21, 12, 0, 0).unwrap()
}

/// Scripted acquisition feed: returns canned fixtures and scores, or fails
/// on demand per feed type.
#[derive(Default, Clone)]
pub struct StubFeed {
    pub fixtures: Vec<UpcomingMatch>,
    pub scores: Vec<ScoredMatch>,
    pub fail_upcoming: bool,
    pub fail_scores: bool,
}

impl AcquisitionFeed for StubFeed {
    async fn fetch_upcoming(&self) -> anyhow::Result<Vec<UpcomingMatch>> {
        if self.fail_upcoming {
            anyhow::bail!("fixtures endpoint unreachable");
        }
        Ok(self.fixtures.clone())
    }

    async fn fetch_scores(&self) -> anyhow::Result<Vec<ScoredMatch>> {
        if self.fail_scores {
            anyhow::bail!("scores endpoint unreachable");
        }
        Ok(self.scores.clone())
    }
}

#[allow(dead_code)]
pub fn fixture(home: &str, away: &str, league: &str, kickoff: &str) -> UpcomingMatch {
    UpcomingMatch::new(home, away, league, kickoff, MarketSignals::default())
}

#[allow(dead_code)]
pub fn scored(home: &str, away: &str, league: Option<&str>, kickoff: &str, score: &str) -> ScoredMatch {
    ScoredMatch {
        home_team: home.into(),
        away_team: away.into(),
        league: league.map(Into::into),
        kickoff: kickoff.into(),
        score: score.into(),
    }
}

#[allow(dead_code)]
pub fn result_days_ago(
    now: DateTime<Utc>,
    days: i64,
    home: &str,
    away: &str,
    hg: i32,
    ag: i32,
) -> HistoricalResult {
    HistoricalResult::new(home, away, "Test League", now - Duration::days(days), hg, ag)
}
