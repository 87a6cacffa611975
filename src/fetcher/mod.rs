pub mod espn;


use futures_util::future::try_join_all;
use thiserror::Error;

use crate::leagues::{League, SourceRegistry};
use crate::scoreboard::{self, Match};

#[derive(Debug, Error)]
pub enum FetchError {
    /// Network failure or non-success HTTP status from one source.
    #[error("failed to read {league} scoreboard")]
    SourceRead {
        league: League,
        #[source]
        source: reqwest::Error,
    },

    /// A provider record the normalizer cannot turn into a [`Match`].
    #[error("malformed record {event_id} from {league}: {reason}")]
    MalformedRecord {
        league: League,
        event_id: String,
        reason: String,
    },
}

/// One fetch cycle: read every registered source concurrently, normalize
/// each source's events, flatten, and sort. Fail-fast: the first source
/// that errors fails the whole cycle and no matches are returned.
#[tracing::instrument(skip_all)]
pub async fn fetch_all(
    client: &reqwest::Client,
    registry: &SourceRegistry,
) -> Result<Vec<Match>, FetchError> {
    let reads = registry
        .sources()
        .iter()
        .map(|source| fetch_league(client, source.league, &source.endpoint));

    let per_source = try_join_all(reads).await?;

    let mut matches: Vec<Match> = per_source.into_iter().flatten().collect();
    scoreboard::sort_matches(&mut matches);

    tracing::info!(total = matches.len(), "fetch cycle complete");

    Ok(matches)
}

async fn fetch_league(
    client: &reqwest::Client,
    league: League,
    endpoint: &str,
) -> Result<Vec<Match>, FetchError> {
    let events = espn::fetch_scoreboard(client, league, endpoint).await?;

    events
        .into_iter()
        .map(|event| espn::normalize(event, league))
        .collect()
}
