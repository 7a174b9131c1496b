//! Cricket league statistics
//!
//! Computes descriptive team and career statistics from two historical
//! tables: one row per match and one row per delivery.

pub mod data;
pub mod query;
pub mod stats;
pub mod web;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Unique identifier for a match
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct MatchId(pub i64);

impl fmt::Display for MatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Match({})", self.0)
    }
}

/// Extras awarded on a delivery (runs not scored off the bat)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExtraType {
    #[serde(rename = "wides")]
    Wide,
    #[serde(rename = "noballs")]
    NoBall,
    #[serde(rename = "byes")]
    Bye,
    #[serde(rename = "legbyes")]
    LegBye,
    #[serde(rename = "penalty")]
    Penalty,
}

impl ExtraType {
    /// Parse the dataset's spelling of an extra type
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "wides" => Some(ExtraType::Wide),
            "noballs" => Some(ExtraType::NoBall),
            "byes" => Some(ExtraType::Bye),
            "legbyes" => Some(ExtraType::LegBye),
            "penalty" => Some(ExtraType::Penalty),
            _ => None,
        }
    }

    /// Extras never charged against the bowler's conceded runs
    pub fn exempts_bowler(&self) -> bool {
        matches!(self, ExtraType::Bye | ExtraType::LegBye | ExtraType::Penalty)
    }
}

/// How a batter was dismissed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DismissalKind {
    #[serde(rename = "caught")]
    Caught,
    #[serde(rename = "caught and bowled")]
    CaughtAndBowled,
    #[serde(rename = "bowled")]
    Bowled,
    #[serde(rename = "stumped")]
    Stumped,
    #[serde(rename = "lbw")]
    Lbw,
    #[serde(rename = "hit wicket")]
    HitWicket,
    #[serde(rename = "run out")]
    RunOut,
    #[serde(rename = "retired hurt")]
    RetiredHurt,
    #[serde(rename = "retired out")]
    RetiredOut,
    #[serde(rename = "obstructing the field")]
    ObstructingField,
}

impl DismissalKind {
    /// Parse the dataset's spelling of a dismissal kind
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "caught" => Some(DismissalKind::Caught),
            "caught and bowled" => Some(DismissalKind::CaughtAndBowled),
            "bowled" => Some(DismissalKind::Bowled),
            "stumped" => Some(DismissalKind::Stumped),
            "lbw" => Some(DismissalKind::Lbw),
            "hit wicket" => Some(DismissalKind::HitWicket),
            "run out" => Some(DismissalKind::RunOut),
            "retired hurt" => Some(DismissalKind::RetiredHurt),
            "retired out" => Some(DismissalKind::RetiredOut),
            "obstructing the field" => Some(DismissalKind::ObstructingField),
            _ => None,
        }
    }

    /// Dismissals credited to the bowler (run-outs and similar are not)
    pub fn credits_bowler(&self) -> bool {
        matches!(
            self,
            DismissalKind::Caught
                | DismissalKind::CaughtAndBowled
                | DismissalKind::Bowled
                | DismissalKind::Stumped
                | DismissalKind::Lbw
                | DismissalKind::HitWicket
        )
    }
}

/// One played match
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchRecord {
    pub id: MatchId,
    pub date: NaiveDate,
    pub team1: String,
    pub team2: String,
    /// Match-number label; the literal "Final" marks a championship match
    pub match_number: String,
    /// None denotes no result or a tie
    pub winning_team: Option<String>,
    pub player_of_match: Option<String>,
}

impl MatchRecord {
    /// Check if the given team played in this match
    pub fn involves(&self, team: &str) -> bool {
        self.team1 == team || self.team2 == team
    }

    /// Get the opposing team for a given team
    pub fn opponent_of(&self, team: &str) -> Option<&str> {
        if self.team1 == team {
            Some(&self.team2)
        } else if self.team2 == team {
            Some(&self.team1)
        } else {
            None
        }
    }

    /// Check if the given team won this match
    pub fn won_by(&self, team: &str) -> bool {
        self.winning_team.as_deref() == Some(team)
    }

    /// A match with no winning team recorded (washout or tie)
    pub fn is_no_result(&self) -> bool {
        self.winning_team.is_none()
    }

    /// A championship match
    pub fn is_final(&self) -> bool {
        self.match_number == "Final"
    }
}

/// One ball bowled, the atomic unit of the dataset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryRecord {
    pub match_id: MatchId,
    /// 1 or 2 for standard play; higher numbers are tie-breaker overs
    pub innings: u8,
    pub batting_team: String,
    pub batter: String,
    pub bowler: String,
    /// Runs scored off the bat
    pub batsman_run: u32,
    /// Total runs on the delivery including extras
    pub total_run: u32,
    pub extra_type: Option<ExtraType>,
    pub is_wicket: bool,
    pub player_out: Option<String>,
    pub dismissal: Option<DismissalKind>,
    /// Scorer correction: exclude this delivery from four/six counts
    pub non_boundary: bool,
}

/// Application-wide errors
#[derive(Debug, Error)]
pub enum CricketError {
    #[error("Invalid team name: {0}")]
    InvalidTeam(String),

    #[error("Data integrity fault: {0}")]
    DataIntegrity(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Server error: {0}")]
    Server(#[from] rocket::Error),
}

pub type Result<T> = std::result::Result<T, CricketError>;

/// Application configuration loaded from config.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub data: DataConfig,
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    pub matches_path: String,
    pub deliveries_path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub address: String,
    pub port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            data: DataConfig {
                matches_path: "data/matches.csv".to_string(),
                deliveries_path: "data/deliveries.csv".to_string(),
            },
            server: ServerConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            address: "127.0.0.1".to_string(),
            port: 8000,
        }
    }
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            CricketError::Config(format!("Failed to read config file {}: {}", path, e))
        })?;
        toml::from_str(&content)
            .map_err(|e| CricketError::Config(format!("Failed to parse config: {}", e)))
    }

    pub fn save(&self, path: &str) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| CricketError::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
