//! Single-elimination knockout bracket.
//!
//! Entrants are paired in entry order (no seeding). When every match of the
//! latest round has a winner, the next round is built from consecutive
//! winners until one champion is left.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

/// Bracket errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BracketError {
    #[error("Number of entrants must be a power of 2 (e.g. 4, 8, 16), got {0}")]
    InvalidEntrantCount(usize),

    #[error("Entrant names must not be blank")]
    BlankEntrant,

    #[error("No match at round {round}, position {index}")]
    MatchNotFound { round: usize, index: usize },

    #[error("{0} is not playing in this match")]
    NotInMatch(String),

    #[error("Match already decided")]
    AlreadyDecided,

    #[error("The bracket is complete")]
    Complete,
}

/// One pairing in a round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketMatch {
    /// 1-based round number
    pub round: usize,
    pub player1: String,
    pub player2: String,
    pub winner: Option<String>,
}

impl BracketMatch {
    fn new(round: usize, player1: String, player2: String) -> Self {
        Self {
            round,
            player1,
            player2,
            winner: None,
        }
    }

    pub fn is_decided(&self) -> bool {
        self.winner.is_some()
    }
}

/// Knockout bracket state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bracket {
    rounds: Vec<Vec<BracketMatch>>,
}

impl Bracket {
    /// Build round one from the entrants in the given order.
    pub fn new<S: AsRef<str>>(entrants: &[S]) -> Result<Self, BracketError> {
        let count = entrants.len();
        if count < 2 || !count.is_power_of_two() {
            return Err(BracketError::InvalidEntrantCount(count));
        }

        let names: Vec<String> = entrants
            .iter()
            .map(|e| e.as_ref().trim().to_string())
            .collect();
        if names.iter().any(|n| n.is_empty()) {
            return Err(BracketError::BlankEntrant);
        }

        let first_round = names
            .chunks(2)
            .map(|pair| BracketMatch::new(1, pair[0].clone(), pair[1].clone()))
            .collect();

        info!("Generated bracket for {} entrants", count);
        Ok(Self {
            rounds: vec![first_round],
        })
    }

    pub fn rounds(&self) -> &[Vec<BracketMatch>] {
        &self.rounds
    }

    /// Winner of the final, once played.
    pub fn champion(&self) -> Option<&str> {
        match self.rounds.last() {
            Some(last) if last.len() == 1 => last[0].winner.as_deref(),
            _ => None,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.champion().is_some()
    }

    /// Earliest undecided match as (round index, match index).
    pub fn next_pending(&self) -> Option<(usize, usize)> {
        self.rounds.iter().enumerate().find_map(|(r, round)| {
            round
                .iter()
                .position(|m| !m.is_decided())
                .map(|i| (r, i))
        })
    }

    /// Record the winner of match `index` in round `round` (both 0-based).
    pub fn record_winner(
        &mut self,
        round: usize,
        index: usize,
        winner: &str,
    ) -> Result<(), BracketError> {
        if self.is_complete() {
            return Err(BracketError::Complete);
        }

        let game = self
            .rounds
            .get_mut(round)
            .and_then(|r| r.get_mut(index))
            .ok_or(BracketError::MatchNotFound { round, index })?;

        if game.is_decided() {
            return Err(BracketError::AlreadyDecided);
        }
        if winner != game.player1 && winner != game.player2 {
            return Err(BracketError::NotInMatch(winner.to_string()));
        }

        game.winner = Some(winner.to_string());
        debug!("Round {} match {}: {} advances", round + 1, index + 1, winner);

        self.advance();
        Ok(())
    }

    /// Record a winner for the earliest undecided match.
    pub fn record_next_winner(&mut self, winner: &str) -> Result<(), BracketError> {
        let (round, index) = self.next_pending().ok_or(BracketError::Complete)?;
        self.record_winner(round, index, winner)
    }

    fn advance(&mut self) {
        let Some(last) = self.rounds.last() else {
            return;
        };
        if last.len() < 2 || !last.iter().all(BracketMatch::is_decided) {
            return;
        }

        let next_round_number = self.rounds.len() + 1;
        let winners: Vec<String> = last.iter().filter_map(|m| m.winner.clone()).collect();
        let next = winners
            .chunks(2)
            .map(|pair| BracketMatch::new(next_round_number, pair[0].clone(), pair[1].clone()))
            .collect();

        info!("Round {} generated", next_round_number);
        self.rounds.push(next);
    }
}
