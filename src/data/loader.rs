//! CSV loading for the match and delivery tables
//!
//! Parses the raw CSV rows into typed records, failing fast on any
//! malformed value. No row is ever silently dropped.

use crate::{
    CricketError, DeliveryRecord, DismissalKind, ExtraType, MatchId, MatchRecord, Result,
};
use chrono::NaiveDate;
use serde::Deserialize;
use std::path::Path;

/// Raw CSV row for the match table
#[derive(Debug, Deserialize)]
struct MatchRow {
    #[serde(rename = "ID")]
    id: i64,
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Team1")]
    team1: String,
    #[serde(rename = "Team2")]
    team2: String,
    #[serde(rename = "MatchNumber")]
    match_number: String,
    #[serde(rename = "WinningTeam")]
    winning_team: String,
    #[serde(rename = "Player_of_Match")]
    player_of_match: String,
}

/// Raw CSV row for the delivery table
#[derive(Debug, Deserialize)]
struct DeliveryRow {
    #[serde(rename = "ID")]
    match_id: i64,
    innings: u8,
    #[serde(rename = "BattingTeam")]
    batting_team: String,
    batter: String,
    bowler: String,
    batsman_run: u32,
    total_run: u32,
    extra_type: String,
    #[serde(rename = "isWicketDelivery")]
    is_wicket: u8,
    player_out: String,
    kind: String,
    non_boundary: u8,
}

/// Missing values appear as empty strings or the literal "NA"
fn optional(value: String) -> Option<String> {
    if value.is_empty() || value == "NA" {
        None
    } else {
        Some(value)
    }
}

impl MatchRow {
    fn into_record(self) -> Result<MatchRecord> {
        let date = NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").map_err(|e| {
            CricketError::Parse(format!("match {}: bad date {:?}: {}", self.id, self.date, e))
        })?;
        if self.team1.is_empty() || self.team2.is_empty() {
            return Err(CricketError::DataIntegrity(format!(
                "match {}: empty team name",
                self.id
            )));
        }
        Ok(MatchRecord {
            id: MatchId(self.id),
            date,
            team1: self.team1,
            team2: self.team2,
            match_number: self.match_number,
            winning_team: optional(self.winning_team),
            player_of_match: optional(self.player_of_match),
        })
    }
}

impl DeliveryRow {
    fn into_record(self) -> Result<DeliveryRecord> {
        if self.batting_team.is_empty() {
            return Err(CricketError::DataIntegrity(format!(
                "delivery in match {}: empty batting team",
                self.match_id
            )));
        }
        let extra_type = match optional(self.extra_type) {
            None => None,
            Some(s) => Some(ExtraType::parse(&s).ok_or_else(|| {
                CricketError::Parse(format!(
                    "delivery in match {}: unknown extra type {:?}",
                    self.match_id, s
                ))
            })?),
        };
        let dismissal = match optional(self.kind) {
            None => None,
            Some(s) => Some(DismissalKind::parse(&s).ok_or_else(|| {
                CricketError::Parse(format!(
                    "delivery in match {}: unknown dismissal kind {:?}",
                    self.match_id, s
                ))
            })?),
        };
        Ok(DeliveryRecord {
            match_id: MatchId(self.match_id),
            innings: self.innings,
            batting_team: self.batting_team,
            batter: self.batter,
            bowler: self.bowler,
            batsman_run: self.batsman_run,
            total_run: self.total_run,
            extra_type,
            is_wicket: self.is_wicket != 0,
            player_out: optional(self.player_out),
            dismissal,
            non_boundary: self.non_boundary != 0,
        })
    }
}

/// Load the match table from a CSV file
pub fn load_matches<P: AsRef<Path>>(path: P) -> Result<Vec<MatchRecord>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut records = Vec::new();
    for row in reader.deserialize() {
        let row: MatchRow = row?;
        records.push(row.into_record()?);
    }
    log::info!("Loaded {} matches", records.len());
    Ok(records)
}

/// Load the delivery table from a CSV file
pub fn load_deliveries<P: AsRef<Path>>(path: P) -> Result<Vec<DeliveryRecord>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut records = Vec::new();
    for row in reader.deserialize() {
        let row: DeliveryRow = row?;
        records.push(row.into_record()?);
    }
    log::info!("Loaded {} deliveries", records.len());
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optional_handles_missing_markers() {
        assert_eq!(optional(String::new()), None);
        assert_eq!(optional("NA".to_string()), None);
        assert_eq!(optional("V Kohli".to_string()), Some("V Kohli".to_string()));
    }

    #[test]
    fn test_match_row_conversion() {
        let row = MatchRow {
            id: 1,
            date: "2022-05-29".to_string(),
            team1: "Rajasthan Royals".to_string(),
            team2: "Gujarat Titans".to_string(),
            match_number: "Final".to_string(),
            winning_team: "Gujarat Titans".to_string(),
            player_of_match: "HH Pandya".to_string(),
        };
        let record = row.into_record().unwrap();
        assert_eq!(record.id, MatchId(1));
        assert!(record.is_final());
        assert!(record.won_by("Gujarat Titans"));
    }

    #[test]
    fn test_match_row_rejects_bad_date() {
        let row = MatchRow {
            id: 2,
            date: "29/05/2022".to_string(),
            team1: "A".to_string(),
            team2: "B".to_string(),
            match_number: "1".to_string(),
            winning_team: String::new(),
            player_of_match: String::new(),
        };
        assert!(matches!(row.into_record(), Err(CricketError::Parse(_))));
    }

    #[test]
    fn test_delivery_row_conversion() {
        let row = DeliveryRow {
            match_id: 1,
            innings: 1,
            batting_team: "Rajasthan Royals".to_string(),
            batter: "YBK Jaiswal".to_string(),
            bowler: "Mohammed Shami".to_string(),
            batsman_run: 0,
            total_run: 1,
            extra_type: "wides".to_string(),
            is_wicket: 0,
            player_out: "NA".to_string(),
            kind: "NA".to_string(),
            non_boundary: 0,
        };
        let record = row.into_record().unwrap();
        assert_eq!(record.extra_type, Some(ExtraType::Wide));
        assert_eq!(record.player_out, None);
        assert_eq!(record.dismissal, None);
        assert!(!record.is_wicket);
    }

    #[test]
    fn test_delivery_row_rejects_unknown_kind() {
        let row = DeliveryRow {
            match_id: 3,
            innings: 1,
            batting_team: "A".to_string(),
            batter: "X".to_string(),
            bowler: "Y".to_string(),
            batsman_run: 0,
            total_run: 0,
            extra_type: String::new(),
            is_wicket: 1,
            player_out: "X".to_string(),
            kind: "timed out by committee".to_string(),
            non_boundary: 0,
        };
        assert!(matches!(row.into_record(), Err(CricketError::Parse(_))));
    }
}
