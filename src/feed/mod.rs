pub mod http;

pub use http::{FeedError, HttpFeed};

use crate::models::{ScoredMatch, UpcomingMatch};

/// The acquisition collaborator: one feed of upcoming fixtures with market
/// signals, one feed of fresh final scores. The two may fail independently;
/// the orchestrator treats the first as mandatory and the second as
/// best-effort.
#[allow(async_fn_in_trait)]
pub trait AcquisitionFeed {
    async fn fetch_upcoming(&self) -> anyhow::Result<Vec<UpcomingMatch>>;

    async fn fetch_scores(&self) -> anyhow::Result<Vec<ScoredMatch>>;
}
