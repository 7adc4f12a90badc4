//! Derived statistics models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::MatchResult;

/// Cumulative statistics for one player across all their matches.
///
/// Recomputed from the match list on every query; never persisted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerAggregate {
    /// Player name (identity key)
    pub name: String,

    pub matches_played: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub goals_for: u64,
    pub goals_against: u64,

    /// goals_for - goals_against
    pub goal_difference: i64,

    /// 3 per win, 1 per draw
    pub points: u32,

    /// Win rate in percent (0.0 to 100.0)
    pub win_rate: f64,

    /// Mean possession share in percent
    pub avg_possession: f64,
}

impl PlayerAggregate {
    /// Zeroed aggregate for a player.
    pub fn new(name: String) -> Self {
        Self {
            name,
            ..Default::default()
        }
    }

    /// Apply one match result from this player's perspective.
    pub fn record_result(&mut self, result: MatchResult) {
        match result {
            MatchResult::Win => {
                self.wins += 1;
                self.points += 3;
            }
            MatchResult::Loss => self.losses += 1,
            MatchResult::Draw => {
                self.draws += 1;
                self.points += 1;
            }
        }
    }
}

/// What the current streak consists of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StreakKind {
    Win,
    Loss,
    Draw,
    None,
}

impl From<MatchResult> for StreakKind {
    fn from(result: MatchResult) -> Self {
        match result {
            MatchResult::Win => StreakKind::Win,
            MatchResult::Loss => StreakKind::Loss,
            MatchResult::Draw => StreakKind::Draw,
        }
    }
}

impl std::fmt::Display for StreakKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StreakKind::Win => write!(f, "win"),
            StreakKind::Loss => write!(f, "loss"),
            StreakKind::Draw => write!(f, "draw"),
            StreakKind::None => write!(f, "none"),
        }
    }
}

/// Run of consecutive most-recent matches sharing one result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Streak {
    #[serde(rename = "type")]
    pub kind: StreakKind,
    pub count: u32,
}

impl Streak {
    pub fn none() -> Self {
        Self {
            kind: StreakKind::None,
            count: 0,
        }
    }
}

impl std::fmt::Display for Streak {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.kind == StreakKind::None {
            write!(f, "none")
        } else {
            write!(f, "{} {}", self.count, self.kind)
        }
    }
}

/// Wins and total matches for one calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyPerformance {
    pub year: i32,
    pub month: u32,
    pub wins: u32,
    pub total: u32,
}

impl MonthlyPerformance {
    /// Short label, e.g. "Jan 25".
    pub fn label(&self) -> String {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .map(|d| d.format("%b %y").to_string())
            .unwrap_or_else(|| format!("{:04}-{:02}", self.year, self.month))
    }

    /// Win share in percent.
    pub fn win_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.wins as f64 / self.total as f64 * 100.0
        }
    }
}

/// Headline numbers for the whole match log.
///
/// Goal totals are counted from player 1's side, which is the logging user
/// in a personal match log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchSummary {
    pub total: u32,
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
    pub total_goals_for: u64,
    pub total_goals_against: u64,
    pub avg_goals_for: f64,
    pub avg_goals_against: f64,

    /// Win rate in percent
    pub win_rate: f64,

    pub current_streak: Streak,
    pub favorite_formation: Option<String>,
}
