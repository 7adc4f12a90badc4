//! Core data models for the match tracker.

mod formation;
mod match_record;
mod new_match;
mod stats;

pub use formation::*;
pub use match_record::*;
pub use new_match::*;
pub use stats::*;
