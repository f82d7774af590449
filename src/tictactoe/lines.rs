//! Winning line analysis for Tic-Tac-Toe

use super::{Cell, Player};

/// Winning line indices on the 3x3 board, in the order they are checked
pub const WINNING_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8], // rows
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8], // columns
    [0, 4, 8],
    [2, 4, 6], // diagonals
];

/// Utility for analyzing winning lines in Tic-Tac-Toe
pub struct LineAnalyzer;

impl LineAnalyzer {
    /// Owner of the first complete line (rows, then columns, then diagonals)
    pub fn winner(cells: &[Cell; 9]) -> Option<Player> {
        WINNING_LINES
            .iter()
            .find_map(|line| Self::line_owner(cells, line))
    }

    /// Check if a player has won by having three in a row
    pub fn has_won(cells: &[Cell; 9], player: Player) -> bool {
        WINNING_LINES
            .iter()
            .any(|line| Self::line_owner(cells, line) == Some(player))
    }

    /// A line belongs to a player only when all three cells hold that player's mark
    fn line_owner(cells: &[Cell; 9], line: &[usize; 3]) -> Option<Player> {
        let first = cells[line[0]].player()?;
        line[1..]
            .iter()
            .all(|&idx| cells[idx] == first.to_cell())
            .then_some(first)
    }
}
