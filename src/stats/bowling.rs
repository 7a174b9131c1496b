//! Career bowling statistics

use crate::data::Ball;
use crate::stats::filters::{group_by_match, rows_excluding_extras, rows_for_player, Role};
use crate::{ExtraType, MatchId};
use serde::Serialize;
use std::collections::BTreeSet;

/// Career bowling figures over a set of deliveries
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BowlingStats {
    pub innings: usize,
    #[serde(rename = "wicket")]
    pub wickets: u64,
    /// Runs conceded per over; 0 with no legal balls bowled
    #[serde(serialize_with = "super::serialize_metric")]
    pub economy: f64,
    /// Runs conceded per wicket; infinite with no wickets
    #[serde(serialize_with = "super::serialize_metric")]
    pub average: f64,
    /// Balls per wicket; NaN with no wickets, which has no meaningful
    /// "very large" reading the way an average does
    #[serde(rename = "strikeRate", serialize_with = "super::serialize_metric")]
    pub strike_rate: f64,
    pub fours: usize,
    pub sixes: usize,
    /// "wickets/runs" of the best single-match figures; None when the
    /// player bowled no deliveries at all
    pub best_figure: Option<String>,
    #[serde(rename = "3+W")]
    pub three_wicket_hauls: usize,
    #[serde(rename = "mom")]
    pub player_of_match: usize,
}

/// Single-match bowling figures, reduced per match before any rollup
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct MatchFigures {
    wickets: u64,
    runs: u64,
}

/// Compute the bowling block for `name` over the given rows.
///
/// Same contract as `batsman_stats`: callers pre-filter rows, and empty
/// row sets yield the zero/infinity block.
pub fn bowler_stats(name: &str, rows: &[&Ball]) -> BowlingStats {
    let bowling = rows_for_player(rows, Role::Bowling, name);

    // Wides and no-balls are not legal deliveries
    let legal = rows_excluding_extras(&bowling, &[ExtraType::Wide, ExtraType::NoBall]).len();
    let runs: u64 = bowling.iter().map(|b| u64::from(b.bowler_run)).sum();
    let wickets = bowling.iter().filter(|b| b.is_bowler_wicket).count() as u64;

    let economy = if legal == 0 {
        0.0
    } else {
        runs as f64 / legal as f64 * 6.0
    };
    let average = if wickets == 0 {
        f64::INFINITY
    } else {
        runs as f64 / wickets as f64
    };
    let strike_rate = if wickets == 0 {
        f64::NAN
    } else {
        legal as f64 / wickets as f64 * 100.0
    };

    let fours = bowling
        .iter()
        .filter(|b| b.delivery.batsman_run == 4 && !b.delivery.non_boundary)
        .count();
    let sixes = bowling
        .iter()
        .filter(|b| b.delivery.batsman_run == 6 && !b.delivery.non_boundary)
        .count();

    let figures = group_by_match(&bowling, |acc: &mut MatchFigures, b| {
        acc.runs += u64::from(b.bowler_run);
        if b.is_bowler_wicket {
            acc.wickets += 1;
        }
    });
    let innings = figures.len();
    let three_wicket_hauls = figures.values().filter(|f| f.wickets >= 3).count();

    // Most wickets, then fewest runs; first match (ascending id) on a
    // full tie
    let mut best: Option<MatchFigures> = None;
    for f in figures.values() {
        let better = match best {
            None => true,
            Some(b) => f.wickets > b.wickets || (f.wickets == b.wickets && f.runs < b.runs),
        };
        if better {
            best = Some(*f);
        }
    }
    let best_figure = best.map(|f| format!("{}/{}", f.wickets, f.runs));

    let award_matches: BTreeSet<MatchId> = bowling
        .iter()
        .filter(|b| b.player_of_match.as_deref() == Some(name))
        .map(|b| b.delivery.match_id)
        .collect();

    BowlingStats {
        innings,
        wickets,
        economy,
        average,
        strike_rate,
        fours,
        sixes,
        best_figure,
        three_wicket_hauls,
        player_of_match: award_matches.len(),
    }
}
