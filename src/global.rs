use std::sync::Arc;
use std::time::Duration;

use anyhow::Context as _;

use crate::config::Config;
use crate::leagues::SourceRegistry;
use crate::store::ScoreboardStore;

pub struct Global {
    pub config: Config,
    pub registry: SourceRegistry,
    pub http_client: reqwest::Client,
    pub store: ScoreboardStore,
    pub started_at: std::time::Instant,
}

impl Global {
    pub fn init(config: Config) -> anyhow::Result<Arc<Self>> {
        let registry = SourceRegistry::from_config(&config.sources)?;

        for league in registry.leagues() {
            if let Some(endpoint) = registry.resolve(league) {
                tracing::info!(league = %league, endpoint, "registered source");
            }
        }

        let http_client = reqwest::Client::builder()
            .user_agent(&config.api.user_agent)
            .timeout(Duration::from_secs(config.fetch.timeout_secs))
            .build()
            .context("http client")?;

        Ok(Arc::new(Self {
            config,
            registry,
            http_client,
            store: ScoreboardStore::new(),
            started_at: std::time::Instant::now(),
        }))
    }
}
