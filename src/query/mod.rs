//! Public query facade
//!
//! The four entry points the outside world sees, assembled from the
//! statistic functions and returning serializable payloads. Team-name
//! faults are converted to a structured error payload at this boundary;
//! player names are deliberately not validated, so an unknown name
//! yields the zero/infinity block rather than an error.

use crate::data::{loader, Ball, CricketData};
use crate::stats::{
    batsman_stats, bowler_stats, head_to_head, team_record, BattingStats, BowlingStats,
    HeadToHead, TeamRecord,
};
use crate::{CricketError, DataConfig, Result};
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use serde_json::{json, Value};
use std::collections::BTreeMap;

/// Error message surfaced for a bad team name
pub const INVALID_TEAM_ERROR: &str = "Invalid team name";

/// The loaded engine: an immutable derived dataset plus the query
/// entry points. Queries are pure; no synchronization is needed once
/// the engine is built.
pub struct Engine {
    data: CricketData,
}

/// Roster of all teams in the league
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Teams {
    pub teams: Vec<String>,
}

/// Career record for one player: the unfiltered block plus one block
/// per opposing team
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerRecord<T> {
    pub name: String,
    pub all: T,
    pub against: BTreeMap<String, T>,
}

// Wire format wraps the record in a single player-name key:
// {<name>: {"all": {...}, "against": {<team>: {...}, ...}}}
impl<T: Serialize> Serialize for PlayerRecord<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct Inner<'a, T> {
            all: &'a T,
            against: &'a BTreeMap<String, T>,
        }
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(
            &self.name,
            &Inner {
                all: &self.all,
                against: &self.against,
            },
        )?;
        map.end()
    }
}

impl Engine {
    /// Load both tables from the configured CSV files and derive the
    /// analysis fields. This is the one-time initialization barrier;
    /// every query after it is a pure function of the result.
    pub fn load(config: &DataConfig) -> Result<Engine> {
        let matches = loader::load_matches(&config.matches_path)?;
        let deliveries = loader::load_deliveries(&config.deliveries_path)?;
        Ok(Engine {
            data: CricketData::new(matches, deliveries)?,
        })
    }

    pub fn new(data: CricketData) -> Engine {
        Engine { data }
    }

    pub fn data(&self) -> &CricketData {
        &self.data
    }

    /// Roster of teams, sorted and de-duplicated
    pub fn teams(&self) -> Teams {
        Teams {
            teams: self.data.teams().to_vec(),
        }
    }

    /// Head-to-head record between two named teams
    pub fn team_vs_team(&self, team1: &str, team2: &str) -> Result<HeadToHead> {
        head_to_head(&self.data, team1, team2)
    }

    /// Full record for one team
    pub fn team_record(&self, team: &str) -> Result<TeamRecord> {
        team_record(&self.data, team)
    }

    /// Career batting record, overall and versus every team
    pub fn batsman_record(&self, name: &str) -> PlayerRecord<BattingStats> {
        let rows = self.data.career_balls();
        let against = self
            .data
            .teams()
            .iter()
            .map(|team| {
                let versus: Vec<&Ball> = rows
                    .iter()
                    .copied()
                    .filter(|b| b.bowling_team == *team)
                    .collect();
                (team.clone(), batsman_stats(name, &versus))
            })
            .collect();
        PlayerRecord {
            name: name.to_string(),
            all: batsman_stats(name, &rows),
            against,
        }
    }

    /// Career bowling record, overall and versus every team
    pub fn bowler_record(&self, name: &str) -> PlayerRecord<BowlingStats> {
        let rows = self.data.career_balls();
        let against = self
            .data
            .teams()
            .iter()
            .map(|team| {
                let versus: Vec<&Ball> = rows
                    .iter()
                    .copied()
                    .filter(|b| b.delivery.batting_team == *team)
                    .collect();
                (team.clone(), bowler_stats(name, &versus))
            })
            .collect();
        PlayerRecord {
            name: name.to_string(),
            all: bowler_stats(name, &rows),
            against,
        }
    }
}

/// The error payload for a bad team name
pub fn error_payload() -> Value {
    json!({ "error": INVALID_TEAM_ERROR })
}

/// Render a facade result as its JSON payload, converting an
/// `InvalidTeam` fault to the structured error payload
pub fn respond<T: Serialize>(result: Result<T>) -> Value {
    match result {
        Ok(payload) => match serde_json::to_value(&payload) {
            Ok(value) => value,
            Err(e) => json!({ "error": e.to_string() }),
        },
        Err(CricketError::InvalidTeam(_)) => error_payload(),
        Err(other) => json!({ "error": other.to_string() }),
    }
}
