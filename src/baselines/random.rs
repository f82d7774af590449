//! Uniform-random baseline

use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::{
    Error, Result,
    ports::Agent,
    tictactoe::{Board, Player},
};

/// Picks uniformly among legal moves. Never learns.
#[derive(Debug, Clone)]
pub struct RandomAgent {
    name: String,
    player: Player,
    rng: StdRng,
}

impl RandomAgent {
    /// Fixed seed so that benchmark runs are reproducible
    pub const DEFAULT_SEED: u64 = 42;

    pub fn new(player: Player) -> Self {
        Self::with_seed(player, Self::DEFAULT_SEED)
    }

    pub fn with_seed(player: Player, seed: u64) -> Self {
        Self {
            name: "Random".to_string(),
            player,
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Agent for RandomAgent {
    fn name(&self) -> &str {
        &self.name
    }

    fn player(&self) -> Player {
        self.player
    }

    fn select_move(&mut self, board: &Board, _player: Player) -> Result<usize> {
        let moves = board.legal_moves();
        if moves.is_empty() {
            return Err(Error::NoValidMoves);
        }
        Ok(moves[self.rng.random_range(0..moves.len())])
    }

    fn set_rng_seed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_always_legal() {
        let mut agent = RandomAgent::new(Player::Two);
        let board = Board::from_key_str("120120000").unwrap();
        for _ in 0..100 {
            let position = agent.select_move(&board, Player::One).unwrap();
            assert!(board.is_empty(position));
        }
    }

    #[test]
    fn test_same_seed_same_moves() {
        let mut a = RandomAgent::with_seed(Player::One, 7);
        let mut b = RandomAgent::with_seed(Player::One, 7);
        let board = Board::new();
        for _ in 0..20 {
            assert_eq!(
                a.choose_action(&board).unwrap(),
                b.choose_action(&board).unwrap()
            );
        }
    }

    #[test]
    fn test_full_board_has_no_move() {
        let mut agent = RandomAgent::new(Player::One);
        let board = Board::from_key_str("121212211").unwrap();
        assert!(matches!(
            agent.choose_action(&board),
            Err(Error::NoValidMoves)
        ));
    }

    #[test]
    fn test_covers_every_legal_move() {
        let mut agent = RandomAgent::with_seed(Player::One, 1);
        let board = Board::from_key_str("100020000").unwrap();
        let mut seen = [false; 9];
        for _ in 0..500 {
            seen[agent.choose_action(&board).unwrap()] = true;
        }
        for position in board.legal_moves() {
            assert!(seen[position], "position {position} never chosen");
        }
        assert!(!seen[0] && !seen[4]);
    }
}
