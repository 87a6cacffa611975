use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::{Mutex, RwLock};

use crate::fetcher;
use crate::global::Global;
use crate::scoreboard::Match;

/// Outcome of the most recent fetch cycle. Replaced wholesale on every
/// cycle; consumers never observe a partially updated collection.
#[derive(Debug, Clone)]
pub enum Scoreboard {
    /// No fetch cycle has completed yet.
    Pending,
    Ready {
        matches: Arc<Vec<Match>>,
        fetched_at: DateTime<Utc>,
    },
    /// The last cycle failed; the previous collection is discarded.
    Failed { error: String },
}

#[derive(Debug)]
pub struct ScoreboardStore {
    current: RwLock<Scoreboard>,
    loading: AtomicBool,
    refresh_gate: Mutex<()>,
}

impl ScoreboardStore {
    pub fn new() -> Self {
        Self {
            current: RwLock::new(Scoreboard::Pending),
            loading: AtomicBool::new(false),
            refresh_gate: Mutex::new(()),
        }
    }

    pub async fn current(&self) -> Scoreboard {
        self.current.read().await.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::Acquire)
    }
}

impl Default for ScoreboardStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Run one fetch cycle and publish the result.
///
/// Single-flight: returns `false` without fetching when another cycle
/// already holds the gate, leaving the current snapshot untouched. The
/// loading flag is set for the duration of the cycle and cleared on both
/// the success and the failure path.
pub async fn refresh(global: &Global) -> bool {
    let store = &global.store;

    let Ok(_guard) = store.refresh_gate.try_lock() else {
        tracing::debug!("refresh already in flight, skipping");
        return false;
    };

    store.loading.store(true, Ordering::Release);

    let next = match fetcher::fetch_all(&global.http_client, &global.registry).await {
        Ok(matches) => Scoreboard::Ready {
            matches: Arc::new(matches),
            fetched_at: Utc::now(),
        },
        Err(e) => {
            let e = anyhow::Error::new(e);
            tracing::error!(error = %e, "fetch cycle failed");
            Scoreboard::Failed {
                error: format!("{e:#}"),
            }
        }
    };

    *store.current.write().await = next;
    store.loading.store(false, Ordering::Release);

    true
}
