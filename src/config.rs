use std::net::SocketAddr;

use config::{ConfigError, Environment, File};
use serde::Deserialize;

use crate::leagues::League;

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    pub bind: SocketAddr,
    pub user_agent: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FetchConfig {
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RefresherConfig {
    pub enabled: bool,
    pub interval_secs: u64,
}

/// One registered remote source: a league and its scoreboard endpoint.
/// Kept in configuration rather than code so tests can point the fetch
/// coordinator at fake endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    pub league: League,
    pub endpoint: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub api: ApiConfig,
    pub logging: LoggingConfig,
    pub fetch: FetchConfig,
    pub refresher: RefresherConfig,
    pub sources: Vec<SourceConfig>,
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        let s = config::Config::builder()
            .add_source(File::with_name("config/default.yaml").required(false))
            .add_source(File::with_name("config/local.yaml").required(false))
            .add_source(Environment::with_prefix("APP").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
