//! Team record computation
//!
//! Head-to-head and overall team records over the match table.

use crate::data::CricketData;
use crate::{CricketError, Result};
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use std::collections::BTreeMap;

/// Head-to-head record between two teams
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadToHead {
    pub team1: String,
    pub team2: String,
    pub total: usize,
    pub team1_wins: usize,
    pub team2_wins: usize,
    /// No-results and ties between the two
    pub draws: usize,
}

// Wire format keys the win counts by team name:
// {"total": n, <team1>: w1, <team2>: w2, "draws": d}
impl Serialize for HeadToHead {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(4))?;
        map.serialize_entry("total", &self.total)?;
        map.serialize_entry(&self.team1, &self.team1_wins)?;
        map.serialize_entry(&self.team2, &self.team2_wins)?;
        map.serialize_entry("draws", &self.draws)?;
        map.end()
    }
}

/// Overall record for one team
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Overall {
    pub matches: usize,
    pub won: usize,
    pub loss: usize,
    #[serde(rename = "noResult")]
    pub no_result: usize,
    /// Finals won
    pub titles: usize,
}

/// Full record for one team: overall plus head-to-head versus every
/// other team in the league
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamRecord {
    pub team: String,
    pub overall: Overall,
    pub against: BTreeMap<String, HeadToHead>,
}

// Wire format wraps the record in a single team-name key
impl Serialize for TeamRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct Inner<'a> {
            overall: &'a Overall,
            against: &'a BTreeMap<String, HeadToHead>,
        }
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(
            &self.team,
            &Inner {
                overall: &self.overall,
                against: &self.against,
            },
        )?;
        map.end()
    }
}

/// Head-to-head record between two named teams.
///
/// Fails with `InvalidTeam` when either name never appears in the match
/// table; names are matched exactly and case-sensitively.
pub fn head_to_head(data: &CricketData, team1: &str, team2: &str) -> Result<HeadToHead> {
    if !data.has_team(team1) {
        return Err(CricketError::InvalidTeam(team1.to_string()));
    }
    if !data.has_team(team2) {
        return Err(CricketError::InvalidTeam(team2.to_string()));
    }

    let mut total = 0;
    let mut team1_wins = 0;
    let mut team2_wins = 0;
    for m in data.matches() {
        let met = (m.team1 == team1 && m.team2 == team2)
            || (m.team1 == team2 && m.team2 == team1);
        if !met {
            continue;
        }
        total += 1;
        if m.won_by(team1) {
            team1_wins += 1;
        } else if m.won_by(team2) {
            team2_wins += 1;
        }
    }

    Ok(HeadToHead {
        team1: team1.to_string(),
        team2: team2.to_string(),
        total,
        team1_wins,
        team2_wins,
        draws: total - team1_wins - team2_wins,
    })
}

/// Full record for one team, including the per-opponent breakdown in
/// sorted opponent order.
pub fn team_record(data: &CricketData, team: &str) -> Result<TeamRecord> {
    if !data.has_team(team) {
        return Err(CricketError::InvalidTeam(team.to_string()));
    }

    let mut matches = 0;
    let mut won = 0;
    let mut no_result = 0;
    let mut titles = 0;
    for m in data.matches().iter().filter(|m| m.involves(team)) {
        matches += 1;
        if m.won_by(team) {
            won += 1;
            if m.is_final() {
                titles += 1;
            }
        } else if m.is_no_result() {
            no_result += 1;
        }
    }

    let against = data
        .teams()
        .iter()
        .filter(|t| t.as_str() != team)
        .map(|t| head_to_head(data, team, t).map(|h| (t.clone(), h)))
        .collect::<Result<BTreeMap<_, _>>>()?;

    Ok(TeamRecord {
        team: team.to_string(),
        overall: Overall {
            matches,
            won,
            loss: matches - won - no_result,
            no_result,
            titles,
        },
        against,
    })
}
