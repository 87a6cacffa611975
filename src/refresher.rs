use std::sync::Arc;
use std::time::Duration;

use tokio::time::MissedTickBehavior;

use crate::global::Global;
use crate::store;

/// Periodic background refresh of the scoreboard, running the same fetch
/// cycle the manual refresh endpoint triggers.
#[tracing::instrument(name = "Refresher", skip_all)]
pub async fn run(global: Arc<Global>) -> anyhow::Result<()> {
    if !global.config.refresher.enabled {
        tracing::info!("refresher is disabled");
        // Park forever so tokio::select doesn't exit
        std::future::pending::<()>().await;
        return Ok(());
    }

    let interval_secs = global.config.refresher.interval_secs;
    tracing::info!(interval_secs, "starting refresher");

    let mut interval = tokio::time::interval(Duration::from_secs(interval_secs));
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first tick fires immediately; the startup fetch already ran.
    interval.tick().await;

    loop {
        interval.tick().await;

        if !store::refresh(&global).await {
            tracing::debug!("previous fetch cycle still running");
        }
    }
}
