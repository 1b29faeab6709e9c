use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

use crate::feed::AcquisitionFeed;
use crate::models::{MarketSignals, ScoredMatch, UpcomingMatch};

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// Wire shape of an upcoming fixture. Row identity and ingestion time are
/// assigned on this side, not by the feed.
#[derive(Debug, Deserialize)]
struct FixtureDto {
    home_team: String,
    away_team: String,
    league: String,
    kickoff: String,
    #[serde(default)]
    signals: MarketSignals,
}

/// JSON acquisition feed over HTTP: `GET {base}/fixtures` for upcoming
/// matches with market signals, `GET {base}/scores` for fresh final scores.
#[derive(Debug, Clone)]
pub struct HttpFeed {
    http: Client,
    base_url: String,
}

impl HttpFeed {
    pub fn new(http: Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    async fn get_fixtures(&self) -> Result<Vec<FixtureDto>, FeedError> {
        let url = format!("{}/fixtures", self.base_url);
        let resp = self.http.get(&url).send().await?.error_for_status()?;
        Ok(resp.json().await?)
    }

    async fn get_scores(&self) -> Result<Vec<ScoredMatch>, FeedError> {
        let url = format!("{}/scores", self.base_url);
        let resp = self.http.get(&url).send().await?.error_for_status()?;
        Ok(resp.json().await?)
    }
}

impl AcquisitionFeed for HttpFeed {
    async fn fetch_upcoming(&self) -> anyhow::Result<Vec<UpcomingMatch>> {
        let fixtures = self.get_fixtures().await?;
        Ok(fixtures
            .into_iter()
            .map(|f| UpcomingMatch::new(f.home_team, f.away_team, f.league, f.kickoff, f.signals))
            .collect())
    }

    async fn fetch_scores(&self) -> anyhow::Result<Vec<ScoredMatch>> {
        Ok(self.get_scores().await?)
    }
}
