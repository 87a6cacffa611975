use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;

use super::FetchError;
use crate::leagues::League;
use crate::scoreboard::{Match, MatchState, MatchStatus, Team};

// ESPN site API scoreboard payload. Scores arrive as strings and team
// metadata nests one level below the competitor entry.

#[derive(Debug, Deserialize)]
pub struct ScoreboardResponse {
    #[serde(default)]
    pub events: Vec<Event>,
}

#[derive(Debug, Deserialize)]
pub struct Event {
    pub id: String,
    pub date: String,
    pub status: Status,
    #[serde(default)]
    pub competitions: Vec<Competition>,
}

#[derive(Debug, Deserialize)]
pub struct Status {
    #[serde(rename = "displayClock")]
    pub display_clock: Option<String>,
    #[serde(rename = "type")]
    pub status_type: StatusType,
}

#[derive(Debug, Deserialize)]
pub struct StatusType {
    pub state: String,
}

#[derive(Debug, Deserialize)]
pub struct Competition {
    #[serde(default)]
    pub competitors: Vec<Competitor>,
}

#[derive(Debug, Deserialize)]
pub struct Competitor {
    #[serde(rename = "homeAway")]
    pub home_away: String,
    pub team: TeamInfo,
    pub score: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TeamInfo {
    #[serde(rename = "shortDisplayName")]
    pub short_display_name: String,
    pub logo: Option<String>,
}

pub async fn fetch_scoreboard(
    client: &reqwest::Client,
    league: League,
    endpoint: &str,
) -> Result<Vec<Event>, FetchError> {
    let response = client
        .get(endpoint)
        .send()
        .await
        .and_then(|r| r.error_for_status())
        .map_err(|source| FetchError::SourceRead { league, source })?;

    let scoreboard: ScoreboardResponse = response
        .json()
        .await
        .map_err(|source| FetchError::SourceRead { league, source })?;

    tracing::debug!(
        league = league.slug(),
        events = scoreboard.events.len(),
        "fetched scoreboard"
    );

    Ok(scoreboard.events)
}

/// Turn one provider event into the canonical [`Match`].
///
/// Only the first nested competition is used. Home and away competitors
/// are selected by their role flag; a missing or duplicated flag is a
/// [`FetchError::MalformedRecord`], never a silently absent team. The raw
/// score strings are carried verbatim; integer parsing happens later in
/// the score colorizer.
pub fn normalize(event: Event, league: League) -> Result<Match, FetchError> {
    let Event {
        id,
        date,
        status,
        competitions,
    } = event;

    let malformed = |event_id: &str, reason: String| FetchError::MalformedRecord {
        league,
        event_id: event_id.to_string(),
        reason,
    };

    let competition = competitions
        .into_iter()
        .next()
        .ok_or_else(|| malformed(&id, "event has no competition".to_string()))?;

    let (home, away) =
        split_competitors(competition.competitors).map_err(|reason| malformed(&id, reason))?;

    let kickoff = parse_kickoff(&date).map_err(|reason| malformed(&id, reason))?;

    let state = MatchState::from_provider(&status.status_type.state);
    let clock = match state {
        MatchState::Live => status.display_clock,
        _ => None,
    };

    Ok(Match {
        id,
        league,
        league_name: league.display_name().to_string(),
        kickoff,
        status: MatchStatus { state, clock },
        home: team(home),
        away: team(away),
    })
}

fn team(competitor: Competitor) -> Team {
    Team {
        name: competitor.team.short_display_name,
        logo: competitor.team.logo.unwrap_or_default(),
        score: competitor.score,
    }
}

fn split_competitors(competitors: Vec<Competitor>) -> Result<(Competitor, Competitor), String> {
    let mut home = None;
    let mut away = None;

    for competitor in competitors {
        match competitor.home_away.as_str() {
            "home" if home.is_some() => return Err("more than one home competitor".to_string()),
            "home" => home = Some(competitor),
            "away" if away.is_some() => return Err("more than one away competitor".to_string()),
            "away" => away = Some(competitor),
            other => return Err(format!("unrecognized competitor role {other:?}")),
        }
    }

    match (home, away) {
        (Some(home), Some(away)) => Ok((home, away)),
        (None, _) => Err("no competitor flagged home".to_string()),
        (_, None) => Err("no competitor flagged away".to_string()),
    }
}

fn parse_kickoff(raw: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Ok(parsed.with_timezone(&Utc));
    }

    // ESPN omits the seconds: "2026-08-25T19:00Z"
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%MZ")
        .map(|naive| naive.and_utc())
        .map_err(|_| format!("unparseable kickoff date {raw:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_event(state: &str, clock: &str) -> Event {
        let json = serde_json::json!({
            "id": "733839",
            "date": "2026-08-25T19:00Z",
            "status": {
                "displayClock": clock,
                "type": { "state": state, "description": "Second Half" }
            },
            "competitions": [{
                "competitors": [
                    {
                        "homeAway": "home",
                        "team": { "shortDisplayName": "Arsenal", "logo": "https://a.espncdn.com/arsenal.png" },
                        "score": "2"
                    },
                    {
                        "homeAway": "away",
                        "team": { "shortDisplayName": "Chelsea", "logo": "https://a.espncdn.com/chelsea.png" },
                        "score": "1"
                    }
                ]
            }]
        });

        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn normalizes_a_live_event() {
        let m = normalize(sample_event("in", "78'"), League::PremierLeague).unwrap();

        assert_eq!(m.id, "733839");
        assert_eq!(m.league, League::PremierLeague);
        assert_eq!(m.league_name, "Premier League");
        assert_eq!(m.kickoff.to_rfc3339(), "2026-08-25T19:00:00+00:00");
        assert_eq!(m.status.state, MatchState::Live);
        assert_eq!(m.status.clock.as_deref(), Some("78'"));
        assert_eq!(m.home.name, "Arsenal");
        assert_eq!(m.home.score.as_deref(), Some("2"));
        assert_eq!(m.away.name, "Chelsea");
        assert_eq!(m.away.score.as_deref(), Some("1"));
    }

    #[test]
    fn clock_is_dropped_unless_live() {
        let finished = normalize(sample_event("post", "90'+4"), League::SerieA).unwrap();
        assert_eq!(finished.status.state, MatchState::Finished);
        assert_eq!(finished.status.clock, None);

        let scheduled = normalize(sample_event("pre", "0'"), League::SerieA).unwrap();
        assert_eq!(scheduled.status.state, MatchState::Scheduled);
        assert_eq!(scheduled.status.clock, None);
    }

    #[test]
    fn missing_home_flag_is_a_malformed_record() {
        let json = serde_json::json!({
            "id": "1",
            "date": "2026-08-25T19:00Z",
            "status": { "type": { "state": "pre" } },
            "competitions": [{
                "competitors": [
                    { "homeAway": "away", "team": { "shortDisplayName": "Betis" } },
                    { "homeAway": "away", "team": { "shortDisplayName": "Girona" } }
                ]
            }]
        });
        let event: Event = serde_json::from_value(json).unwrap();

        let err = normalize(event, League::LaLiga).unwrap_err();
        assert!(matches!(err, FetchError::MalformedRecord { .. }));
    }

    #[test]
    fn duplicated_home_flag_is_a_malformed_record() {
        let json = serde_json::json!({
            "id": "2",
            "date": "2026-08-25T19:00Z",
            "status": { "type": { "state": "in" } },
            "competitions": [{
                "competitors": [
                    { "homeAway": "home", "team": { "shortDisplayName": "Milan" } },
                    { "homeAway": "home", "team": { "shortDisplayName": "Inter" } }
                ]
            }]
        });
        let event: Event = serde_json::from_value(json).unwrap();

        let err = normalize(event, League::SerieA).unwrap_err();
        assert!(matches!(err, FetchError::MalformedRecord { .. }));
    }

    #[test]
    fn event_without_competition_is_a_malformed_record() {
        let json = serde_json::json!({
            "id": "3",
            "date": "2026-08-25T19:00Z",
            "status": { "type": { "state": "pre" } },
            "competitions": []
        });
        let event: Event = serde_json::from_value(json).unwrap();

        let err = normalize(event, League::PremierLeague).unwrap_err();
        assert!(matches!(err, FetchError::MalformedRecord { .. }));
    }

    #[test]
    fn kickoff_parses_with_and_without_seconds() {
        assert_eq!(
            parse_kickoff("2026-08-25T19:00Z").unwrap().to_rfc3339(),
            "2026-08-25T19:00:00+00:00"
        );
        assert_eq!(
            parse_kickoff("2026-08-25T19:00:30+00:00")
                .unwrap()
                .to_rfc3339(),
            "2026-08-25T19:00:30+00:00"
        );
        assert!(parse_kickoff("tomorrow-ish").is_err());
    }

    #[test]
    fn absent_score_survives_normalization_unparsed() {
        let json = serde_json::json!({
            "id": "4",
            "date": "2026-08-25T21:00Z",
            "status": { "type": { "state": "pre" } },
            "competitions": [{
                "competitors": [
                    { "homeAway": "home", "team": { "shortDisplayName": "Napoli" } },
                    { "homeAway": "away", "team": { "shortDisplayName": "Roma" }, "score": "" }
                ]
            }]
        });
        let event: Event = serde_json::from_value(json).unwrap();

        let m = normalize(event, League::SerieA).unwrap();
        assert_eq!(m.home.score, None);
        assert_eq!(m.away.score.as_deref(), Some(""));
        assert_eq!(m.home.logo, "");
    }
}
