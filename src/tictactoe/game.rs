//! High-level game management

use std::fmt;

use serde::{Deserialize, Serialize};

use super::board::{Board, Player};

/// A move in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub position: usize,
    pub player: Player,
}

/// Outcome of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameOutcome {
    Win(Player),
    Draw,
}

impl GameOutcome {
    /// Winner, or `None` for a draw
    pub fn winner(self) -> Option<Player> {
        match self {
            GameOutcome::Win(player) => Some(player),
            GameOutcome::Draw => None,
        }
    }
}

/// A game in progress: board plus turn alternation and terminal bookkeeping.
///
/// Player one always opens. Once the game is over the current player stays on
/// whoever made the final move and every further move is rejected.
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    current: Player,
    moves: Vec<Move>,
    outcome: Option<GameOutcome>,
}

impl Game {
    pub fn new() -> Self {
        Game {
            board: Board::new(),
            current: Player::One,
            moves: Vec::new(),
            outcome: None,
        }
    }

    /// Play a move for the current player
    ///
    /// # Errors
    ///
    /// - [`crate::Error::GameOver`] after a win or draw
    /// - [`crate::Error::InvalidMove`] for an occupied or out-of-range cell
    ///
    /// The game is unchanged on error.
    pub fn play(&mut self, position: usize) -> Result<(), crate::Error> {
        if self.outcome.is_some() {
            return Err(crate::Error::GameOver);
        }

        if !self.board.set_cell(position, self.current) {
            return Err(crate::Error::InvalidMove { position });
        }

        self.moves.push(Move {
            position,
            player: self.current,
        });

        self.outcome = self.board.outcome();
        if self.outcome.is_none() {
            self.current = self.current.opponent();
        }

        Ok(())
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_player(&self) -> Player {
        self.current
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    pub fn winner(&self) -> Option<Player> {
        self.outcome.and_then(GameOutcome::winner)
    }

    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    pub fn legal_moves(&self) -> Vec<usize> {
        if self.is_over() {
            return Vec::new();
        }
        self.board.legal_moves()
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Current player: {}", self.current)?;
        match self.outcome {
            Some(GameOutcome::Draw) => writeln!(f, "Game Over: Draw!")?,
            Some(GameOutcome::Win(player)) => writeln!(f, "Game Over: Player {player} wins!")?,
            None => {}
        }
        write!(f, "{}", self.board)
    }
}
