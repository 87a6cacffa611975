use serde::{Deserialize, Serialize};

use crate::config::SourceConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum League {
    PremierLeague,
    LaLiga,
    SerieA,
}

impl League {
    pub fn slug(&self) -> &'static str {
        match self {
            Self::PremierLeague => "premier-league",
            Self::LaLiga => "la-liga",
            Self::SerieA => "serie-a",
        }
    }

    pub fn from_slug(s: &str) -> Option<Self> {
        match s {
            "premier-league" => Some(Self::PremierLeague),
            "la-liga" => Some(Self::LaLiga),
            "serie-a" => Some(Self::SerieA),
            _ => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::PremierLeague => "Premier League",
            Self::LaLiga => "La Liga",
            Self::SerieA => "Serie A",
        }
    }
}

impl std::fmt::Display for League {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.slug())
    }
}

#[derive(Debug, Clone)]
pub struct RegisteredSource {
    pub league: League,
    pub endpoint: String,
}

/// Fixed league -> endpoint mapping, built once at startup from
/// configuration and not mutated afterwards.
#[derive(Debug, Clone)]
pub struct SourceRegistry {
    sources: Vec<RegisteredSource>,
}

impl SourceRegistry {
    pub fn from_config(sources: &[SourceConfig]) -> anyhow::Result<Self> {
        if sources.is_empty() {
            anyhow::bail!("no sources configured");
        }

        let mut registered: Vec<RegisteredSource> = Vec::with_capacity(sources.len());

        for source in sources {
            if registered.iter().any(|r| r.league == source.league) {
                anyhow::bail!("duplicate source for league {}", source.league);
            }

            registered.push(RegisteredSource {
                league: source.league,
                endpoint: source.endpoint.clone(),
            });
        }

        Ok(Self {
            sources: registered,
        })
    }

    pub fn sources(&self) -> &[RegisteredSource] {
        &self.sources
    }

    pub fn leagues(&self) -> impl Iterator<Item = League> + '_ {
        self.sources.iter().map(|s| s.league)
    }

    pub fn resolve(&self, league: League) -> Option<&str> {
        self.sources
            .iter()
            .find(|s| s.league == league)
            .map(|s| s.endpoint.as_str())
    }
}
