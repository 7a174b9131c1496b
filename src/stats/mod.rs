//! Statistic computation
//!
//! Row-selection and grouping primitives plus the team, batting and
//! bowling statistic functions built on them. Every function here is
//! total: an empty row set produces a well-defined zero/infinity block,
//! never an error.

pub mod batting;
pub mod bowling;
pub mod filters;
pub mod team;

pub use batting::{batsman_stats, BattingStats};
pub use bowling::{bowler_stats, BowlingStats};
pub use team::{head_to_head, team_record, HeadToHead, Overall, TeamRecord};

/// JSON convention for possibly non-finite metrics: an infinite value
/// serializes as the string "Infinity", NaN as null, finite values as
/// plain numbers. Standard JSON has no infinity literal, and the
/// zero / infinite / non-numeric distinction carries domain meaning.
pub(crate) fn serialize_metric<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    if value.is_nan() {
        serializer.serialize_none()
    } else if value.is_infinite() {
        serializer.serialize_str("Infinity")
    } else {
        serializer.serialize_f64(*value)
    }
}
