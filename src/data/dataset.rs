//! Joined dataset and derived per-delivery fields
//!
//! The field derivation runs exactly once per load; the result is
//! immutable for the process lifetime and every query reads from it.

use crate::{CricketError, DeliveryRecord, MatchId, MatchRecord, Result};
use chrono::NaiveDate;
use std::collections::HashMap;

/// A delivery augmented with fields derived from its match
#[derive(Debug, Clone)]
pub struct Ball {
    pub delivery: DeliveryRecord,
    /// The match team that is not the delivery's batting team
    pub bowling_team: String,
    /// Runs charged against the bowler: byes, leg-byes and penalty runs
    /// are exempt; wides and no-balls are not
    pub bowler_run: u32,
    /// Wicket attributable to the bowler's effort
    pub is_bowler_wicket: bool,
    /// The match's award, denormalized onto every delivery
    pub player_of_match: Option<String>,
}

/// The loaded, joined and derived dataset
pub struct CricketData {
    matches: Vec<MatchRecord>,
    balls: Vec<Ball>,
    teams: Vec<String>,
}

impl CricketData {
    /// Join deliveries to their matches and derive the analysis fields.
    ///
    /// A delivery referencing a missing match, or naming a batting team
    /// that is neither match team, fails the whole load.
    pub fn new(matches: Vec<MatchRecord>, deliveries: Vec<DeliveryRecord>) -> Result<Self> {
        let by_id: HashMap<MatchId, &MatchRecord> =
            matches.iter().map(|m| (m.id, m)).collect();

        let mut balls = Vec::with_capacity(deliveries.len());
        for delivery in deliveries {
            let record = by_id.get(&delivery.match_id).ok_or_else(|| {
                CricketError::DataIntegrity(format!(
                    "delivery references unknown {}",
                    delivery.match_id
                ))
            })?;
            let bowling_team = record
                .opponent_of(&delivery.batting_team)
                .ok_or_else(|| {
                    CricketError::DataIntegrity(format!(
                        "{}: batting team {:?} is not one of {:?} / {:?}",
                        delivery.match_id, delivery.batting_team, record.team1, record.team2
                    ))
                })?
                .to_string();
            let bowler_run = match delivery.extra_type {
                Some(extra) if extra.exempts_bowler() => 0,
                _ => delivery.total_run,
            };
            let is_bowler_wicket = delivery.is_wicket
                && delivery.dismissal.is_some_and(|k| k.credits_bowler());
            balls.push(Ball {
                bowling_team,
                bowler_run,
                is_bowler_wicket,
                player_of_match: record.player_of_match.clone(),
                delivery,
            });
        }

        let mut teams: Vec<String> = matches
            .iter()
            .flat_map(|m| [m.team1.clone(), m.team2.clone()])
            .collect();
        teams.sort();
        teams.dedup();

        log::info!(
            "Derived {} deliveries across {} matches, {} teams",
            balls.len(),
            matches.len(),
            teams.len()
        );

        Ok(CricketData {
            matches,
            balls,
            teams,
        })
    }

    pub fn matches(&self) -> &[MatchRecord] {
        &self.matches
    }

    pub fn balls(&self) -> &[Ball] {
        &self.balls
    }

    /// Sorted, de-duplicated union of both team-name columns
    pub fn teams(&self) -> &[String] {
        &self.teams
    }

    /// Check a name against the roster (exact, case-sensitive)
    pub fn has_team(&self, name: &str) -> bool {
        self.teams.binary_search_by(|t| t.as_str().cmp(name)).is_ok()
    }

    /// Deliveries from the standard two innings, the rows career
    /// statistics are computed over (tie-breaker overs excluded)
    pub fn career_balls(&self) -> Vec<&Ball> {
        self.balls
            .iter()
            .filter(|b| matches!(b.delivery.innings, 1 | 2))
            .collect()
    }

    /// First and last match dates in the dataset
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let first = self.matches.iter().map(|m| m.date).min()?;
        let last = self.matches.iter().map(|m| m.date).max()?;
        Some((first, last))
    }
}
