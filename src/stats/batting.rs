//! Career batting statistics

use crate::data::Ball;
use crate::stats::filters::{group_by_match, rows_excluding_extras, rows_for_player, Role};
use crate::{ExtraType, MatchId};
use serde::Serialize;
use std::collections::BTreeSet;

/// Career batting figures over a set of deliveries
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BattingStats {
    pub innings: usize,
    pub runs: u64,
    pub fours: usize,
    pub sixes: usize,
    /// Runs per dismissal; infinite for a batter never dismissed
    #[serde(rename = "avg", serialize_with = "super::serialize_metric")]
    pub average: f64,
    #[serde(rename = "strikeRate", serialize_with = "super::serialize_metric")]
    pub strike_rate: f64,
    pub fifties: usize,
    pub hundreds: usize,
    /// Best single-match score, suffixed "*" when unbeaten in that match
    #[serde(rename = "highestScore")]
    pub highest_score: String,
    /// May go negative for a player only ever run out off the
    /// non-striker's end
    #[serde(rename = "notOut")]
    pub not_out: i64,
    #[serde(rename = "mom")]
    pub player_of_match: usize,
}

/// Compute the batting block for `name` over the given rows.
///
/// Callers pre-filter rows to the standard two innings, and to a single
/// opposing team for the versus-opponent shape. Total over empty row
/// sets: an unknown name yields the zero/infinity block.
pub fn batsman_stats(name: &str, rows: &[&Ball]) -> BattingStats {
    // Dismissals count before the batter filter so that a run-out off
    // the non-striker's end still ends the innings.
    let dismissals = rows
        .iter()
        .filter(|b| b.delivery.player_out.as_deref() == Some(name))
        .count();
    let batting = rows_for_player(rows, Role::Batting, name);

    let runs: u64 = batting.iter().map(|b| u64::from(b.delivery.batsman_run)).sum();
    let fours = batting
        .iter()
        .filter(|b| b.delivery.batsman_run == 4 && !b.delivery.non_boundary)
        .count();
    let sixes = batting
        .iter()
        .filter(|b| b.delivery.batsman_run == 6 && !b.delivery.non_boundary)
        .count();
    let average = if dismissals == 0 {
        f64::INFINITY
    } else {
        runs as f64 / dismissals as f64
    };

    // Wides are not faced deliveries
    let faced = rows_excluding_extras(&batting, &[ExtraType::Wide]).len();
    let strike_rate = if faced == 0 {
        0.0
    } else {
        runs as f64 / faced as f64 * 100.0
    };

    let scores = group_by_match(&batting, |acc: &mut u64, b| {
        *acc += u64::from(b.delivery.batsman_run)
    });
    let innings = scores.len();
    let fifties = scores.values().filter(|&&r| (50..=99).contains(&r)).count();
    let hundreds = scores.values().filter(|&&r| r >= 100).count();

    // First match (ascending id) holding the maximum score; the not-out
    // marker is evaluated against that specific match.
    let mut best: Option<(MatchId, u64)> = None;
    for (&id, &r) in &scores {
        if best.map_or(true, |(_, high)| r > high) {
            best = Some((id, r));
        }
    }
    let highest_score = match best {
        None => "0".to_string(),
        Some((id, r)) => {
            let dismissed = batting.iter().any(|b| {
                b.delivery.match_id == id && b.delivery.player_out.as_deref() == Some(name)
            });
            if dismissed {
                r.to_string()
            } else {
                format!("{}*", r)
            }
        }
    };

    let award_matches: BTreeSet<MatchId> = batting
        .iter()
        .filter(|b| b.player_of_match.as_deref() == Some(name))
        .map(|b| b.delivery.match_id)
        .collect();

    BattingStats {
        innings,
        runs,
        fours,
        sixes,
        average,
        strike_rate,
        fifties,
        hundreds,
        highest_score,
        not_out: innings as i64 - dismissals as i64,
        player_of_match: award_matches.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DeliveryRecord, DismissalKind, MatchId};

    fn ball(match_id: i64, batter: &str, runs: u32) -> Ball {
        Ball {
            delivery: DeliveryRecord {
                match_id: MatchId(match_id),
                innings: 1,
                batting_team: "A".to_string(),
                batter: batter.to_string(),
                bowler: "Bowler".to_string(),
                batsman_run: runs,
                total_run: runs,
                extra_type: None,
                is_wicket: false,
                player_out: None,
                dismissal: None,
                non_boundary: false,
            },
            bowling_team: "B".to_string(),
            bowler_run: runs,
            is_bowler_wicket: false,
            player_of_match: None,
        }
    }

    fn dismissed(mut b: Ball, who: &str, kind: DismissalKind) -> Ball {
        b.delivery.is_wicket = true;
        b.delivery.player_out = Some(who.to_string());
        b.delivery.dismissal = Some(kind);
        b.is_bowler_wicket = kind.credits_bowler();
        b
    }

    fn stats_of(balls: &[Ball], name: &str) -> BattingStats {
        let rows: Vec<&Ball> = balls.iter().collect();
        batsman_stats(name, &rows)
    }

    #[test]
    fn test_boundary_scenario_not_out() {
        // Two boundaries in one match, never dismissed
        let balls = vec![ball(1, "X", 4), ball(1, "X", 6)];
        let s = stats_of(&balls, "X");
        assert_eq!(s.runs, 10);
        assert_eq!(s.fours, 1);
        assert_eq!(s.sixes, 1);
        assert_eq!(s.highest_score, "10*");
        assert!(s.average.is_infinite());
        assert_eq!(s.not_out, 1);
    }

    #[test]
    fn test_empty_rows_yield_zero_block() {
        let s = stats_of(&[], "Nobody");
        assert_eq!(s.innings, 0);
        assert_eq!(s.runs, 0);
        assert!(s.average.is_infinite());
        assert_eq!(s.strike_rate, 0.0);
        assert_eq!(s.highest_score, "0");
        assert_eq!(s.not_out, 0);
    }

    #[test]
    fn test_non_boundary_correction_excluded_from_counts() {
        let mut corrected = ball(1, "X", 4);
        corrected.delivery.non_boundary = true;
        let balls = vec![ball(1, "X", 4), corrected];
        let s = stats_of(&balls, "X");
        assert_eq!(s.fours, 1);
        assert_eq!(s.runs, 8);
    }

    #[test]
    fn test_average_and_strike_rate() {
        let balls = vec![
            ball(1, "X", 4),
            ball(1, "X", 0),
            dismissed(ball(1, "X", 2), "X", DismissalKind::Bowled),
        ];
        let s = stats_of(&balls, "X");
        assert_eq!(s.runs, 6);
        assert_eq!(s.average, 6.0);
        assert_eq!(s.strike_rate, 200.0);
        assert_eq!(s.not_out, 0);
    }

    #[test]
    fn test_wides_not_faced() {
        let mut wide = ball(1, "X", 0);
        wide.delivery.extra_type = Some(ExtraType::Wide);
        wide.delivery.total_run = 1;
        let balls = vec![ball(1, "X", 6), wide];
        let s = stats_of(&balls, "X");
        // One faced ball, six runs
        assert_eq!(s.strike_rate, 600.0);
    }

    #[test]
    fn test_fifty_and_hundred_are_per_match() {
        let mut balls = Vec::new();
        // 25 runs in each of two matches: no fifty
        for m in [1, 2] {
            for _ in 0..5 {
                balls.push(ball(m, "X", 5));
            }
        }
        // 60 in match 3, 104 in match 4
        for _ in 0..12 {
            balls.push(ball(3, "X", 5));
        }
        for _ in 0..26 {
            balls.push(ball(4, "X", 4));
        }
        let s = stats_of(&balls, "X");
        assert_eq!(s.fifties, 1);
        assert_eq!(s.hundreds, 1);
        assert_eq!(s.highest_score, "104*");
    }

    #[test]
    fn test_highest_score_marks_dismissal_in_that_match() {
        let balls = vec![
            dismissed(ball(1, "X", 50), "X", DismissalKind::Caught),
            ball(2, "X", 30),
        ];
        let s = stats_of(&balls, "X");
        assert_eq!(s.highest_score, "50");

        // Same scores, dismissal in the other match
        let balls = vec![
            ball(1, "X", 50),
            dismissed(ball(2, "X", 30), "X", DismissalKind::Caught),
        ];
        let s = stats_of(&balls, "X");
        assert_eq!(s.highest_score, "50*");
    }

    #[test]
    fn test_highest_score_tie_uses_first_match() {
        // 20 in match 1 (dismissed) and 20 in match 2 (not out): the
        // marker follows match 1
        let balls = vec![
            dismissed(ball(1, "X", 20), "X", DismissalKind::Lbw),
            ball(2, "X", 20),
        ];
        let s = stats_of(&balls, "X");
        assert_eq!(s.highest_score, "20");
    }

    #[test]
    fn test_run_out_at_non_strikers_end_counts_as_dismissal() {
        // X never faces a ball but is run out backing up
        let balls = vec![dismissed(ball(1, "Y", 1), "X", DismissalKind::RunOut)];
        let s = stats_of(&balls, "X");
        assert_eq!(s.innings, 0);
        assert_eq!(s.average, 0.0);
        assert_eq!(s.not_out, -1);
    }

    #[test]
    fn test_player_of_match_counts_distinct_matches() {
        let mut awarded1 = ball(1, "X", 1);
        awarded1.player_of_match = Some("X".to_string());
        let mut awarded2 = ball(1, "X", 1);
        awarded2.player_of_match = Some("X".to_string());
        let mut other = ball(2, "X", 1);
        other.player_of_match = Some("Y".to_string());
        let s = stats_of(&[awarded1, awarded2, other], "X");
        assert_eq!(s.player_of_match, 1);
    }
}
