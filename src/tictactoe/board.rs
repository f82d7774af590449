//! Board state representation and basic operations

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{game::GameOutcome, lines::LineAnalyzer};
use crate::types::StateKey;

/// Number of cells on the board
pub const CELL_COUNT: usize = crate::types::STATE_KEY_LEN;

/// A cell on the Tic-Tac-Toe board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    One,
    Two,
}

impl Cell {
    /// Digit used in state keys (`0`, `1`, `2`)
    pub fn to_digit(self) -> char {
        match self {
            Cell::Empty => '0',
            Cell::One => '1',
            Cell::Two => '2',
        }
    }

    pub fn from_digit(c: char) -> Option<Cell> {
        match c {
            '0' => Some(Cell::Empty),
            '1' => Some(Cell::One),
            '2' => Some(Cell::Two),
            _ => None,
        }
    }

    /// Player owning this cell, if any
    pub fn player(self) -> Option<Player> {
        match self {
            Cell::One => Some(Player::One),
            Cell::Two => Some(Player::Two),
            Cell::Empty => None,
        }
    }

    fn to_display_char(self) -> char {
        match self {
            Cell::Empty => '_',
            other => other.to_digit(),
        }
    }
}

/// A player in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    One,
    Two,
}

impl Player {
    /// Get the opponent player
    pub fn opponent(self) -> Player {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// Convert player to cell
    pub fn to_cell(self) -> Cell {
        match self {
            Player::One => Cell::One,
            Player::Two => Cell::Two,
        }
    }

    /// Player number as shown to humans (1 or 2)
    pub fn number(self) -> u8 {
        match self {
            Player::One => 1,
            Player::Two => 2,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

/// The 3x3 grid.
///
/// `Board` is `Copy`: search and self-play branch by value, so no two callers
/// ever share a mutable grid. A played cell can only be replaced by building a
/// whole new board with [`Board::from_cells`] or [`Board::decode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Board {
    cells: [Cell; CELL_COUNT],
}

impl Board {
    /// Create an empty board
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite the full state at once
    pub fn from_cells(cells: [Cell; CELL_COUNT]) -> Self {
        Self { cells }
    }

    pub fn cells(&self) -> &[Cell; CELL_COUNT] {
        &self.cells
    }

    /// Get cell at position (0-8), `None` when out of range
    pub fn get(&self, pos: usize) -> Option<Cell> {
        self.cells.get(pos).copied()
    }

    /// Check if a position is on the board and empty
    pub fn is_empty(&self, pos: usize) -> bool {
        self.get(pos) == Some(Cell::Empty)
    }

    /// Place `player`'s mark at `pos`.
    ///
    /// Returns `false` and leaves the board untouched when `pos` is out of
    /// range or the cell is already occupied.
    pub fn set_cell(&mut self, pos: usize, player: Player) -> bool {
        if !self.is_empty(pos) {
            return false;
        }
        self.cells[pos] = player.to_cell();
        true
    }

    /// Copy of this board with `player`'s mark at `pos`
    #[must_use = "with_move returns a new board; the original is unchanged"]
    pub fn with_move(&self, pos: usize, player: Player) -> crate::Result<Board> {
        let mut next = *self;
        if next.set_cell(pos, player) {
            Ok(next)
        } else {
            Err(crate::Error::InvalidMove { position: pos })
        }
    }

    /// Empty positions in ascending order
    pub fn legal_moves(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &cell)| cell == Cell::Empty)
            .map(|(i, _)| i)
            .collect()
    }

    /// Count the number of occupied cells on the board.
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c != Cell::Empty).count()
    }

    pub fn is_full(&self) -> bool {
        !self.cells.contains(&Cell::Empty)
    }

    /// Get the winner if there is one
    pub fn winner(&self) -> Option<Player> {
        LineAnalyzer::winner(&self.cells)
    }

    /// Terminal status: `None` while play continues, otherwise the outcome.
    ///
    /// All eight lines are checked before a full board is declared a draw.
    pub fn outcome(&self) -> Option<GameOutcome> {
        match self.winner() {
            Some(player) => Some(GameOutcome::Win(player)),
            None if self.is_full() => Some(GameOutcome::Draw),
            None => None,
        }
    }

    /// Check if the game is over (win or draw)
    pub fn is_terminal(&self) -> bool {
        self.outcome().is_some()
    }

    /// Row-major digit encoding used as the key of every Q-table
    pub fn encode(&self) -> StateKey {
        StateKey::from_encoded(self.cells.iter().map(|c| c.to_digit()).collect())
    }

    /// Rebuild a board from its key
    pub fn decode(key: &StateKey) -> Board {
        let mut cells = [Cell::Empty; CELL_COUNT];
        for (cell, c) in cells.iter_mut().zip(key.as_str().chars()) {
            // StateKey guarantees only '0', '1', '2'
            *cell = Cell::from_digit(c).unwrap_or_default();
        }
        Board { cells }
    }

    /// Parse and decode a raw key string
    pub fn from_key_str(key: &str) -> crate::Result<Board> {
        StateKey::parse(key).map(|key| Board::decode(&key))
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, &cell) in self.cells.iter().enumerate() {
            write!(f, "{}", cell.to_display_char())?;
            if i % 3 < 2 {
                write!(f, "|")?;
            } else if i < CELL_COUNT - 1 {
                write!(f, "\n-----\n")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn play(moves: &[usize]) -> Board {
        let mut board = Board::new();
        let mut player = Player::One;
        for &pos in moves {
            assert!(board.set_cell(pos, player), "move {pos} should be legal");
            player = player.opponent();
        }
        board
    }

    #[test]
    fn test_new_board() {
        let board = Board::new();
        assert_eq!(board.legal_moves(), (0..9).collect::<Vec<_>>());
        assert_eq!(board.outcome(), None);
        assert_eq!(board.encode().as_str(), "000000000");
    }

    #[test]
    fn test_set_cell_rejects_occupied_and_out_of_range() {
        let mut board = Board::new();
        assert!(board.set_cell(4, Player::One));
        let before = board;

        assert!(!board.set_cell(4, Player::Two));
        assert!(!board.set_cell(9, Player::Two));
        assert!(!board.set_cell(usize::MAX, Player::Two));
        assert_eq!(board, before);
    }

    #[test]
    fn test_with_move_leaves_original_untouched() {
        let board = Board::new();
        let next = board.with_move(0, Player::One).unwrap();
        assert_eq!(board.get(0), Some(Cell::Empty));
        assert_eq!(next.get(0), Some(Cell::One));
        assert!(next.with_move(0, Player::Two).is_err());
    }

    #[test]
    fn test_legal_moves_shrink() {
        let board = play(&[0, 4]);
        assert_eq!(board.legal_moves(), vec![1, 2, 3, 5, 6, 7, 8]);
    }

    #[test]
    fn test_top_row_win() {
        let board = play(&[0, 4, 1, 3, 2]);
        assert_eq!(board.outcome(), Some(GameOutcome::Win(Player::One)));
        assert_eq!(
            board.to_string(),
            "1|1|1\n-----\n2|2|_\n-----\n_|_|_"
        );
    }

    #[test]
    fn test_draw_detection() {
        let board = play(&[0, 1, 2, 4, 3, 6, 5, 8, 7]);
        assert!(board.is_full());
        assert_eq!(board.outcome(), Some(GameOutcome::Draw));
        assert!(board.legal_moves().is_empty());
    }

    #[test]
    fn test_win_on_last_cell_is_not_a_draw() {
        // 1|2|1
        // 2|1|2
        // 2|1|1  (player one completes the main diagonal with the ninth mark)
        let board = Board::from_key_str("121212211").unwrap();
        assert!(board.is_full());
        assert_eq!(board.outcome(), Some(GameOutcome::Win(Player::One)));
    }

    #[test]
    fn test_encode_decode() {
        let board = play(&[0, 2, 4, 6, 8]);
        let key = board.encode();
        assert_eq!(key.as_str(), "102010201");
        assert_eq!(Board::decode(&key), board);
    }

    #[test]
    fn test_from_key_str_rejects_garbage() {
        assert!(Board::from_key_str("").is_err());
        assert!(Board::from_key_str("0000000003").is_err());
    }
}
