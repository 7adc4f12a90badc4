//! # TacticHub
//!
//! Local match tracker and league statistics for a competitive video-game
//! league.
//!
//! ## Architecture
//!
//! - **models**: Core data structures (match records, player aggregates, streaks)
//! - **store**: Copy-on-write match log plus search/filter/sort
//! - **calculate**: League table and analytics, pure functions of the log
//! - **storage**: Whole-log JSON snapshot on disk
//! - **export**: CSV/JSON export of records and the league table
//! - **bracket**: Unseeded knockout bracket
//! - **config**: Configuration loading and validation

pub mod bracket;
pub mod calculate;
pub mod config;
pub mod export;
pub mod models;
pub mod storage;
pub mod store;

pub use models::*;

use chrono::NaiveDate;

/// Parse a match date given as `YYYY-MM-DD`.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("2025-06-15"), NaiveDate::from_ymd_opt(2025, 6, 15));
    }

    #[test]
    fn test_parse_date_trims() {
        assert_eq!(parse_date(" 2024-02-29 "), NaiveDate::from_ymd_opt(2024, 2, 29));
    }

    #[test]
    fn test_parse_date_invalid() {
        assert_eq!(parse_date("15/06/2025"), None);
        assert_eq!(parse_date("2025-02-30"), None);
        assert_eq!(parse_date(""), None);
    }
}
