use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use crate::global::Global;

pub mod scores;

pub fn routes() -> Router<Arc<Global>> {
    Router::new().route("/", get(root)).merge(scores::routes())
}

#[derive(serde::Serialize)]
struct RootResponse {
    message: &'static str,
    version: &'static str,
    uptime: u64,
    endpoints: Vec<String>,
}

#[tracing::instrument(skip(global))]
async fn root(State(global): State<Arc<Global>>) -> Json<RootResponse> {
    let mut endpoints = vec!["/scores".to_string(), "/refresh".to_string()];
    endpoints.extend(
        global
            .registry
            .leagues()
            .map(|league| format!("/scores/{}", league.slug())),
    );

    Json(RootResponse {
        message: "Football Live Scores API",
        version: env!("CARGO_PKG_VERSION"),
        uptime: global.started_at.elapsed().as_secs(),
        endpoints,
    })
}
