//! Row selection and per-match grouping primitives

use crate::data::Ball;
use crate::{ExtraType, MatchId};
use std::collections::BTreeMap;

/// Which side of a delivery a player query refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Batting,
    Bowling,
}

/// Deliveries where `name` is the batter (or bowler)
pub fn rows_for_player<'a>(rows: &[&'a Ball], role: Role, name: &str) -> Vec<&'a Ball> {
    rows.iter()
        .copied()
        .filter(|b| match role {
            Role::Batting => b.delivery.batter == name,
            Role::Bowling => b.delivery.bowler == name,
        })
        .collect()
}

/// Deliveries whose extra type is not one of `excluded`
pub fn rows_excluding_extras<'a>(rows: &[&'a Ball], excluded: &[ExtraType]) -> Vec<&'a Ball> {
    rows.iter()
        .copied()
        .filter(|b| {
            b.delivery
                .extra_type
                .map_or(true, |e| !excluded.contains(&e))
        })
        .collect()
}

/// Fold rows into one accumulator per match, in ascending match-id order.
///
/// Several statistics (fifties, best bowling figure, 3-wicket hauls) are
/// properties of a single match's performance, so rows must be reduced
/// per match before any cross-match rollup.
pub fn group_by_match<'a, T, F>(rows: &[&'a Ball], mut fold: F) -> BTreeMap<MatchId, T>
where
    T: Default,
    F: FnMut(&mut T, &'a Ball),
{
    let mut groups: BTreeMap<MatchId, T> = BTreeMap::new();
    for ball in rows {
        fold(groups.entry(ball.delivery.match_id).or_default(), ball);
    }
    groups
}
