use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{DateTime, Utc};

use crate::global::Global;
use crate::scoreboard::{self, Match, MatchState, ScoreTone, Team};
use crate::store::{self, Scoreboard};

pub fn routes() -> Router<Arc<Global>> {
    Router::new()
        .route("/scores", get(get_all_scores))
        .route("/scores/:league", get(get_league_scores))
        .route("/refresh", post(refresh))
}

/// One fully classified match, ready for a renderer: ordered by the
/// aggregator, labelled by the status classifier, toned by the score
/// colorizer.
#[derive(Debug, serde::Serialize)]
pub struct MatchView {
    pub id: String,
    pub league: &'static str,
    pub league_name: String,
    pub kickoff: DateTime<Utc>,
    pub state: MatchState,
    pub status_label: String,
    pub home: TeamView,
    pub away: TeamView,
}

#[derive(Debug, serde::Serialize)]
pub struct TeamView {
    pub name: String,
    pub logo: String,
    pub score: String,
    pub tone: ScoreTone,
}

impl MatchView {
    fn build(m: &Match) -> Self {
        let scheduled = m.is_scheduled();

        Self {
            id: m.id.clone(),
            league: m.league.slug(),
            league_name: m.league_name.clone(),
            kickoff: m.kickoff,
            state: m.status.state,
            status_label: m.status_label(),
            home: TeamView::build(&m.home, &m.away, scheduled),
            away: TeamView::build(&m.away, &m.home, scheduled),
        }
    }
}

impl TeamView {
    fn build(own: &Team, opponent: &Team, scheduled: bool) -> Self {
        // Scheduled matches show a dash instead of a numeric score.
        let score = if scheduled {
            "-".to_string()
        } else {
            own.score.clone().unwrap_or_else(|| "0".to_string())
        };

        Self {
            name: own.name.clone(),
            logo: own.logo.clone(),
            score,
            tone: ScoreTone::classify(own.score.as_deref(), opponent.score.as_deref(), scheduled),
        }
    }
}

#[derive(Debug, serde::Serialize)]
pub struct ScoresResponse {
    pub loading: bool,
    pub fetched_at: Option<DateTime<Utc>>,
    pub error: Option<String>,
    pub matches: Vec<MatchView>,
}

fn scores_response(global: &Global, board: &Scoreboard, selector: &str) -> ScoresResponse {
    let loading = global.store.is_loading();

    match board {
        Scoreboard::Pending => ScoresResponse {
            loading,
            fetched_at: None,
            error: None,
            matches: Vec::new(),
        },
        Scoreboard::Ready {
            matches,
            fetched_at,
        } => ScoresResponse {
            loading,
            fetched_at: Some(*fetched_at),
            error: None,
            matches: scoreboard::filter_matches(matches, selector)
                .into_iter()
                .map(MatchView::build)
                .collect(),
        },
        Scoreboard::Failed { error } => ScoresResponse {
            loading,
            fetched_at: None,
            error: Some(error.clone()),
            matches: Vec::new(),
        },
    }
}

/// GET /scores
#[tracing::instrument(skip(global))]
async fn get_all_scores(State(global): State<Arc<Global>>) -> Json<ScoresResponse> {
    let board = global.store.current().await;

    Json(scores_response(&global, &board, scoreboard::ALL_LEAGUES))
}

/// GET /scores/{league}
///
/// An unknown league slug yields an empty match list, not an error; the
/// renderer shows its empty state for it.
#[tracing::instrument(skip(global))]
async fn get_league_scores(
    State(global): State<Arc<Global>>,
    Path(league): Path<String>,
) -> Json<ScoresResponse> {
    let board = global.store.current().await;

    Json(scores_response(&global, &board, &league))
}

#[derive(Debug, serde::Serialize)]
struct RefreshResponse {
    started: bool,
    scores: ScoresResponse,
}

/// POST /refresh
///
/// Runs one fetch cycle to completion and returns the resulting
/// scoreboard. `started` is false when another cycle already held the
/// single-flight gate; the returned scores are then whatever that cycle
/// last published.
#[tracing::instrument(skip(global))]
async fn refresh(State(global): State<Arc<Global>>) -> Json<RefreshResponse> {
    let started = store::refresh(&global).await;
    let board = global.store.current().await;

    Json(RefreshResponse {
        started,
        scores: scores_response(&global, &board, scoreboard::ALL_LEAGUES),
    })
}
