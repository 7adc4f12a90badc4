//! Match entry draft and boundary validation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{MatchId, MatchRecord, DEFAULT_FORMATION};

/// Reasons a submitted match is rejected before it reaches the store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchError {
    #[error("Please enter both player names")]
    MissingPlayer,

    #[error("A player cannot play against themselves: {0}")]
    SelfMatch(String),

    #[error("Possession percentages must add up to 100% (got {0}% + {1}%)")]
    InvalidPossession(u8, u8),
}

/// Unvalidated match entry, as collected from the user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMatch {
    pub player1: String,
    pub player2: String,
    pub score1: u32,
    pub score2: u32,
    pub possession1: u8,
    pub possession2: u8,
    pub formation: String,
    pub duration: Option<u32>,
    pub venue: Option<String>,
    pub notes: Option<String>,
}

impl Default for NewMatch {
    fn default() -> Self {
        Self {
            player1: String::new(),
            player2: String::new(),
            score1: 0,
            score2: 0,
            possession1: 50,
            possession2: 50,
            formation: DEFAULT_FORMATION.to_string(),
            duration: Some(90),
            venue: Some("Online".to_string()),
            notes: None,
        }
    }
}

impl NewMatch {
    /// Draft with the two names and scores set, everything else default.
    pub fn between(player1: &str, player2: &str, score1: u32, score2: u32) -> Self {
        Self {
            player1: player1.to_string(),
            player2: player2.to_string(),
            score1,
            score2,
            ..Default::default()
        }
    }

    /// Set player 1's possession; player 2 gets the remainder.
    pub fn with_possession(mut self, possession1: u8) -> Self {
        self.possession1 = possession1;
        self.possession2 = 100u8.saturating_sub(possession1);
        self
    }

    /// Check the entry without consuming it.
    pub fn validate(&self) -> Result<(), MatchError> {
        let player1 = self.player1.trim();
        let player2 = self.player2.trim();

        if player1.is_empty() || player2.is_empty() {
            return Err(MatchError::MissingPlayer);
        }

        if player1 == player2 {
            return Err(MatchError::SelfMatch(player1.to_string()));
        }

        if u16::from(self.possession1) + u16::from(self.possession2) != 100 {
            return Err(MatchError::InvalidPossession(
                self.possession1,
                self.possession2,
            ));
        }

        Ok(())
    }

    /// Validate and turn the draft into an immutable record.
    pub fn into_record(self, id: MatchId, date: NaiveDate) -> Result<MatchRecord, MatchError> {
        self.validate()?;

        let mut record = MatchRecord::new(
            id,
            self.player1.trim().to_string(),
            self.player2.trim().to_string(),
            self.score1,
            self.score2,
            self.possession1,
            self.possession2,
            self.formation,
            date,
        );
        record.duration = self.duration;
        record.venue = self.venue.filter(|v| !v.trim().is_empty());
        record.notes = self.notes.filter(|n| !n.trim().is_empty());

        Ok(record)
    }
}
