//! Match record model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Match identifier (creation timestamp in milliseconds).
pub type MatchId = i64;

/// Outcome of a match from player 1's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchResult {
    Draw,
    Loss,
    Win,
}

impl MatchResult {
    /// Derive the result from the two scores.
    pub fn from_scores(score1: u32, score2: u32) -> Self {
        match score1.cmp(&score2) {
            std::cmp::Ordering::Greater => MatchResult::Win,
            std::cmp::Ordering::Less => MatchResult::Loss,
            std::cmp::Ordering::Equal => MatchResult::Draw,
        }
    }

    /// The same result seen from player 2's side.
    pub fn reversed(&self) -> Self {
        match self {
            MatchResult::Win => MatchResult::Loss,
            MatchResult::Loss => MatchResult::Win,
            MatchResult::Draw => MatchResult::Draw,
        }
    }

    /// Lowercase name as stored and exported.
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchResult::Win => "win",
            MatchResult::Loss => "loss",
            MatchResult::Draw => "draw",
        }
    }
}

impl std::fmt::Display for MatchResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

impl std::str::FromStr for MatchResult {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "win" | "w" => Ok(MatchResult::Win),
            "loss" | "l" => Ok(MatchResult::Loss),
            "draw" | "d" => Ok(MatchResult::Draw),
            other => Err(format!("unknown result: {}", other)),
        }
    }
}

/// How a goal was scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalKind {
    Goal,
    Penalty,
    OwnGoal,
}

/// A single goal event. Display only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub id: i64,

    /// Scorer
    pub player: String,

    /// Match minute
    pub minute: u32,

    #[serde(rename = "type")]
    pub kind: GoalKind,
}

/// One logged result between two named players.
///
/// Field names follow the stored snapshot layout so existing snapshots load
/// unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    /// Unique, strictly increasing identifier
    pub id: MatchId,

    /// Player 1 name
    pub player1: String,

    /// Player 2 name
    pub player2: String,

    pub score1: u32,
    pub score2: u32,

    /// Player 1 possession share (percent)
    pub possession1: u8,

    /// Player 2 possession share (percent)
    pub possession2: u8,

    /// Formation played, e.g. "4-3-3"
    pub formation: String,

    /// Date the match was played
    pub date: NaiveDate,

    /// Result from player 1's perspective, fixed at creation
    pub result: MatchResult,

    /// Match length in minutes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub venue: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub goals: Vec<Goal>,
}

impl MatchRecord {
    /// Create a record, deriving the result from the scores.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: MatchId,
        player1: String,
        player2: String,
        score1: u32,
        score2: u32,
        possession1: u8,
        possession2: u8,
        formation: String,
        date: NaiveDate,
    ) -> Self {
        Self {
            id,
            player1,
            player2,
            score1,
            score2,
            possession1,
            possession2,
            formation,
            date,
            result: MatchResult::from_scores(score1, score2),
            duration: None,
            venue: None,
            notes: None,
            goals: Vec::new(),
        }
    }

    /// Builder method to set the venue.
    pub fn with_venue(mut self, venue: String) -> Self {
        self.venue = Some(venue);
        self
    }

    /// Combined goals scored by both sides.
    pub fn total_goals(&self) -> u64 {
        u64::from(self.score1) + u64::from(self.score2)
    }

    /// Whether the given name played on either side.
    pub fn involves(&self, name: &str) -> bool {
        self.player1 == name || self.player2 == name
    }
}
