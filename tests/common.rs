//! Shared helpers for the integration tests.

#![allow(dead_code)]

use std::collections::HashSet;

use tictactoe_rl::{
    tictactoe::{Board, Player},
    types::StateKey,
};

/// Play `moves` from the empty board, alternating from player one.
pub fn play_moves(moves: &[usize]) -> Board {
    let mut board = Board::new();
    let mut player = Player::One;
    for &pos in moves {
        assert!(board.set_cell(pos, player), "move {pos} should be legal");
        player = player.opponent();
    }
    board
}

/// Every board reachable from the empty board by legal play, terminal ones included.
pub fn reachable_boards() -> Vec<Board> {
    let mut seen: HashSet<Board> = HashSet::new();
    let mut stack = vec![(Board::new(), Player::One)];
    let mut boards = Vec::new();

    while let Some((board, to_move)) = stack.pop() {
        if !seen.insert(board) {
            continue;
        }
        boards.push(board);
        if board.is_terminal() {
            continue;
        }
        for pos in board.legal_moves() {
            let mut next = board;
            next.set_cell(pos, to_move);
            stack.push((next, to_move.opponent()));
        }
    }

    boards
}

pub fn key(s: &str) -> StateKey {
    StateKey::parse(s).unwrap()
}
