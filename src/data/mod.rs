//! Dataset loading and field derivation
//!
//! CSV loading for the two source tables and the one-time join that
//! produces the augmented, analysis-ready delivery records.

pub mod dataset;
pub mod loader;

pub use dataset::{Ball, CricketData};
