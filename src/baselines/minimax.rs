//! Depth-limited minimax search

use crate::{
    Error, Result,
    ports::Agent,
    tictactoe::{Board, Player},
};

/// Exhaustive adversarial search with a fixed lookahead.
///
/// Leaves score +1 for a win by the searching player, -1 for a loss and 0
/// for a draw or a depth cutoff. Every branch works on its own board copy.
/// Among equally scored moves the first legal one wins, so the choice is
/// deterministic for a given board.
#[derive(Debug, Clone)]
pub struct MinimaxAgent {
    name: String,
    player: Player,
    depth: u32,
}

impl MinimaxAgent {
    pub const DEFAULT_DEPTH: u32 = 5;

    pub fn new(player: Player) -> Self {
        Self {
            name: "Minimax".to_string(),
            player,
            depth: Self::DEFAULT_DEPTH,
        }
    }

    /// Plies searched below each candidate move; 9 or more is exhaustive.
    pub fn with_depth(mut self, depth: u32) -> Self {
        self.depth = depth;
        self
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Score of every legal move for `player`, in enumeration order.
    pub fn evaluate_moves(&self, board: &Board, player: Player) -> Vec<(usize, i32)> {
        board
            .legal_moves()
            .into_iter()
            .filter_map(|position| {
                let child = board.with_move(position, player).ok()?;
                Some((
                    position,
                    search(&child, player.opponent(), player, self.depth),
                ))
            })
            .collect()
    }

    fn best_move(&self, board: &Board, player: Player) -> Result<usize> {
        let mut best: Option<(usize, i32)> = None;
        for (position, score) in self.evaluate_moves(board, player) {
            if best.is_none_or(|(_, best_score)| score > best_score) {
                best = Some((position, score));
            }
        }
        best.map(|(position, _)| position)
            .ok_or(Error::NoValidMoves)
    }
}

fn leaf_score(board: &Board, perspective: Player) -> i32 {
    match board.winner() {
        Some(winner) if winner == perspective => 1,
        Some(_) => -1,
        None => 0,
    }
}

fn search(board: &Board, to_move: Player, perspective: Player, depth: u32) -> i32 {
    if depth == 0 || board.is_terminal() {
        return leaf_score(board, perspective);
    }

    let children = board
        .legal_moves()
        .into_iter()
        .filter_map(|position| board.with_move(position, to_move).ok())
        .map(|child| search(&child, to_move.opponent(), perspective, depth - 1));

    let best = if to_move == perspective {
        children.max()
    } else {
        children.min()
    };
    best.unwrap_or_else(|| leaf_score(board, perspective))
}

impl Agent for MinimaxAgent {
    fn name(&self) -> &str {
        &self.name
    }

    fn player(&self) -> Player {
        self.player
    }

    /// Searches on behalf of `player`, whichever seat that is.
    fn select_move(&mut self, board: &Board, player: Player) -> Result<usize> {
        self.best_move(board, player)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_takes_immediate_win() {
        let mut agent = MinimaxAgent::new(Player::One);
        // 1|1|_ / 2|2|_ / _|_|_
        let board = Board::from_key_str("110220000").unwrap();
        assert_eq!(agent.choose_action(&board).unwrap(), 2);
    }

    #[test]
    fn test_blocks_opponent_win() {
        let mut agent = MinimaxAgent::new(Player::Two);
        // 1|1|_ / _|2|_ / _|_|_
        let board = Board::from_key_str("110020000").unwrap();
        assert_eq!(agent.choose_action(&board).unwrap(), 2);
    }

    #[test]
    fn test_select_move_uses_given_player() {
        let mut agent = MinimaxAgent::new(Player::One);
        // Player two to move can win at 5.
        let board = Board::from_key_str("110220100").unwrap();
        assert_eq!(agent.select_move(&board, Player::Two).unwrap(), 5);
    }

    #[test]
    fn test_ties_go_to_first_move() {
        let agent = MinimaxAgent::new(Player::One);
        let scores = agent.evaluate_moves(&Board::new(), Player::One);
        assert_eq!(scores.len(), 9);
        // Depth 5 sees no forced result from the empty board.
        assert!(scores.iter().all(|&(_, score)| score == 0));
        let mut agent = agent;
        assert_eq!(agent.choose_action(&Board::new()).unwrap(), 0);
    }

    #[test]
    fn test_no_moves_on_full_board() {
        let mut agent = MinimaxAgent::new(Player::One);
        let board = Board::from_key_str("121212211").unwrap();
        assert!(matches!(
            agent.choose_action(&board),
            Err(Error::NoValidMoves)
        ));
    }

    #[test]
    fn test_search_does_not_touch_input() {
        let mut agent = MinimaxAgent::new(Player::One);
        let board = Board::from_key_str("100020000").unwrap();
        let before = board;
        agent.choose_action(&board).unwrap();
        assert_eq!(board, before);
    }
}
