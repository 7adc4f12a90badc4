//! Statistics calculation engine.
//!
//! Computes derived views from the match log:
//! - League table (points, goal difference, win rate, possession)
//! - Current streak and favorite formation
//! - Monthly performance trend
//!
//! Everything here is a pure function of the record slice. Nothing reads or
//! writes storage.

pub mod analytics;
pub mod league;

pub use analytics::{
    current_streak, favorite_formation, monthly_performance, recent_months, summarize,
};
pub use league::{league_table, rank_by_win_rate};

/// Calculate win rate in percent from wins over matches played.
pub fn calculate_win_rate(wins: u32, played: u32) -> f64 {
    if played == 0 {
        0.0
    } else {
        wins as f64 / played as f64 * 100.0
    }
}

/// Mean of a running sum, 0 when nothing was counted.
pub fn calculate_average(sum: u64, count: u32) -> f64 {
    if count == 0 {
        0.0
    } else {
        sum as f64 / count as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calculate_win_rate() {
        assert!((calculate_win_rate(5, 6) - 83.33).abs() < 0.01);
        assert_eq!(calculate_win_rate(0, 0), 0.0);
        assert_eq!(calculate_win_rate(3, 6), 50.0);
    }

    #[test]
    fn test_calculate_average() {
        assert_eq!(calculate_average(150, 3), 50.0);
        assert_eq!(calculate_average(10, 0), 0.0);
    }
}
