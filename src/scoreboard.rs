use std::cmp::Ordering;

use chrono::{DateTime, Utc};

use crate::leagues::League;

/// Canonical representation of one fixture, independent of the provider's
/// raw shape. Built fresh on every fetch cycle and never mutated in place.
#[derive(Debug, Clone, serde::Serialize)]
pub struct Match {
    pub id: String,
    pub league: League,
    pub league_name: String,
    pub kickoff: DateTime<Utc>,
    pub status: MatchStatus,
    pub home: Team,
    pub away: Team,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct Team {
    pub name: String,
    pub logo: String,
    /// Raw provider score string, absent before kickoff. Parsing to an
    /// integer is deferred to [`ScoreTone::classify`].
    pub score: Option<String>,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct MatchStatus {
    pub state: MatchState,
    /// Display clock (e.g. `78'`), present only while the match is live.
    pub clock: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchState {
    Scheduled,
    Live,
    Finished,
}

impl MatchState {
    /// Map the provider's status state. Unrecognized values classify as
    /// scheduled so rendering stays total.
    pub fn from_provider(state: &str) -> Self {
        match state {
            "in" => Self::Live,
            "post" => Self::Finished,
            _ => Self::Scheduled,
        }
    }
}

impl Match {
    pub fn is_live(&self) -> bool {
        self.status.state == MatchState::Live
    }

    pub fn is_scheduled(&self) -> bool {
        self.status.state == MatchState::Scheduled
    }

    /// Status line shown under a match card: kickoff time while scheduled,
    /// the live clock while in play, a fixed label once done.
    pub fn status_label(&self) -> String {
        match self.status.state {
            MatchState::Scheduled => self.kickoff.format("%H:%M").to_string(),
            MatchState::Live => self
                .status
                .clock
                .clone()
                .unwrap_or_else(|| "LIVE".to_string()),
            MatchState::Finished => "Finished".to_string(),
        }
    }
}

/// Order a fetch cycle's flattened collection: live matches first, then
/// ascending kickoff. The sort is stable, so matches with equal keys keep
/// their input order. Applied once per cycle; filtering never re-sorts.
pub fn sort_matches(matches: &mut [Match]) {
    matches.sort_by_key(|m| (!m.is_live(), m.kickoff));
}

/// Selector meaning "no league filter".
pub const ALL_LEAGUES: &str = "all";

/// Narrow the ordered collection to one league, or pass everything through
/// for [`ALL_LEAGUES`]. Order-preserving; an unknown selector yields an
/// empty subset rather than an error.
pub fn filter_matches<'a>(matches: &'a [Match], selector: &str) -> Vec<&'a Match> {
    if selector == ALL_LEAGUES {
        return matches.iter().collect();
    }

    match League::from_slug(selector) {
        Some(league) => matches.iter().filter(|m| m.league == league).collect(),
        None => Vec::new(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreTone {
    Leading,
    Losing,
    Tied,
    Neutral,
}

impl ScoreTone {
    /// Classify one team's score against its opponent. Scheduled matches
    /// are always neutral; otherwise a missing or unparseable score counts
    /// as zero (no goals yet during early live play).
    pub fn classify(own: Option<&str>, opponent: Option<&str>, scheduled: bool) -> Self {
        if scheduled {
            return Self::Neutral;
        }

        match parse_score(own).cmp(&parse_score(opponent)) {
            Ordering::Greater => Self::Leading,
            Ordering::Less => Self::Losing,
            Ordering::Equal => Self::Tied,
        }
    }
}

fn parse_score(score: Option<&str>) -> i64 {
    score.and_then(|s| s.trim().parse().ok()).unwrap_or(0)
}
