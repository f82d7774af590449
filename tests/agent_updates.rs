//! Hand-computed learning updates for the tabular agents.

mod common;

use common::key;
use tictactoe_rl::{
    app::AgentConfig,
    monte_carlo::MonteCarloAgent,
    ports::{Agent, LearningAgent, Transition},
    q_learning::{PolicySnapshot, QLearningAgent, QTable, SarsaAgent},
    tictactoe::{Board, Player},
};

const EPS: f64 = 1e-9;

fn config() -> AgentConfig {
    AgentConfig::default().with_seed(11)
}

#[test]
fn test_q_learning_fixture_from_empty_board() {
    let mut agent = QLearningAgent::with_config(Player::One, config());
    agent
        .learn(&Transition::step(
            key("000000000"),
            4,
            0.0,
            key("000010000"),
        ))
        .unwrap();

    assert!(agent.q_table().get(&key("000000000"), 4).abs() < EPS);
}

#[test]
fn test_q_learning_bootstraps_from_best_next_value() {
    let mut agent = QLearningAgent::with_config(Player::One, config());
    let next = key("000010000");

    // Q(next, 0) = 0.1 * (1 - 0) = 0.1
    agent.learn(&Transition::terminal(next.clone(), 0, 1.0)).unwrap();
    assert!((agent.q_table().get(&next, 0) - 0.1).abs() < EPS);

    // Q(root, 4) = 0.1 * (0 + 0.99 * 0.1 - 0) = 0.0099
    agent
        .learn(&Transition::step(key("000000000"), 4, 0.0, next))
        .unwrap();
    assert!((agent.q_table().get(&key("000000000"), 4) - 0.0099).abs() < EPS);
}

#[test]
fn test_q_learning_repeated_terminal_updates() {
    let mut agent = QLearningAgent::with_config(Player::One, config());
    let state = key("110220000");
    agent.learn(&Transition::terminal(state.clone(), 2, 1.0)).unwrap();
    agent.learn(&Transition::terminal(state.clone(), 2, 1.0)).unwrap();

    // 0.1, then 0.1 + 0.1 * (1 - 0.1)
    assert!((agent.q_table().get(&state, 2) - 0.19).abs() < EPS);
}

#[test]
fn test_sarsa_lagged_update() {
    let mut agent = SarsaAgent::with_config(Player::One, config());
    agent.set_evaluating(true);
    let root = key("000000000");
    let next = key("000010000");

    agent
        .learn(&Transition::step(root.clone(), 4, 0.0, next.clone()))
        .unwrap();
    assert!(agent.q_table().is_empty());
    assert!(agent.pending().is_some());

    agent.learn(&Transition::terminal(next.clone(), 0, 1.0)).unwrap();
    assert!((agent.q_table().get(&root, 4) - 0.1).abs() < EPS);
    assert!((agent.q_table().get(&next, 0) - 0.1).abs() < EPS);
    assert!(agent.pending().is_none());
}

/// Successor values for the exploration tests: cell 6 is the best legal move.
fn uneven_successor_table() -> PolicySnapshot {
    let mut q_table = QTable::new();
    q_table.set(&key("200010001"), 2, 0.3).unwrap();
    q_table.set(&key("200010001"), 6, 0.6).unwrap();
    PolicySnapshot::from_q_table(&q_table)
}

#[test]
fn test_sarsa_target_follows_exploring_policy() {
    let greedy = 0.1 * (-0.01 + 0.99 * 0.6);
    let allowed = [0.0, 0.3, 0.6].map(|q| 0.1 * (-0.01 + 0.99 * q));

    let root = key("000000000");
    let mut below_greedy = 0;
    for seed in 0..40 {
        let config = AgentConfig::default()
            .with_exploration(1.0, 1.0, 1.0)
            .with_seed(seed);
        let mut agent = SarsaAgent::with_config(Player::One, config);
        agent.restore(uneven_successor_table()).unwrap();

        agent
            .learn(&Transition::step(root.clone(), 4, 0.0, key("000010000")))
            .unwrap();
        agent
            .learn(&Transition::step(key("200010000"), 8, -0.01, key("200010001")))
            .unwrap();

        let value = agent.q_table().get(&root, 4);
        assert!(allowed.iter().any(|v| (value - v).abs() < EPS));
        if value < greedy - EPS {
            below_greedy += 1;
        }
    }
    // Five of six legal successors are worth less than the best one.
    assert!(below_greedy > 0);
}

#[test]
fn test_q_learning_target_ignores_exploration() {
    for seed in 0..10 {
        let config = AgentConfig::default()
            .with_exploration(1.0, 1.0, 1.0)
            .with_seed(seed);
        let mut agent = QLearningAgent::with_config(Player::One, config);
        agent.restore(uneven_successor_table()).unwrap();

        agent
            .learn(&Transition::step(key("200010000"), 8, -0.01, key("200010001")))
            .unwrap();
        let expected = 0.1 * (-0.01 + 0.99 * 0.6);
        assert!((agent.q_table().get(&key("200010000"), 8) - expected).abs() < EPS);
    }
}

#[test]
fn test_monte_carlo_mean_of_returns() {
    let mut agent = MonteCarloAgent::with_config(Player::One, config());
    let state = key("000000000");
    for reward in [1.0, 0.0, 1.0] {
        agent.learn(&Transition::terminal(state.clone(), 4, reward)).unwrap();
    }

    assert_eq!(agent.returns().history(&state, 4), &[1.0, 0.0, 1.0]);
    assert!((agent.q_table().get(&state, 4) - 2.0 / 3.0).abs() < EPS);
}

#[test]
fn test_monte_carlo_discounts_backward() {
    let mut agent = MonteCarloAgent::with_config(Player::One, config());
    let s0 = key("000000000");
    let s1 = key("100020000");

    agent
        .learn(&Transition::step(s0.clone(), 0, -0.01, s1.clone()))
        .unwrap();
    agent.learn(&Transition::terminal(s1.clone(), 8, 1.0)).unwrap();

    assert!((agent.q_table().get(&s1, 8) - 1.0).abs() < EPS);
    assert!((agent.q_table().get(&s0, 0) - (-0.01 + 0.99)).abs() < EPS);
    assert!(agent.episode().is_empty());
}

#[test]
fn test_epsilon_never_drops_below_floor() {
    let fast = AgentConfig::default()
        .with_seed(1)
        .with_exploration(0.9, 0.5, 0.1);
    let mut q = QLearningAgent::with_config(Player::One, fast);
    let mut sarsa = SarsaAgent::with_config(Player::One, fast);
    let mut mc = MonteCarloAgent::with_config(Player::One, fast);

    let state = key("000000000");
    for _ in 0..200 {
        let transition = Transition::terminal(state.clone(), 0, 0.0);
        q.learn(&transition).unwrap();
        sarsa.learn(&transition).unwrap();
        mc.learn(&transition).unwrap();
    }

    for epsilon in [q.epsilon(), sarsa.epsilon(), mc.epsilon()] {
        assert!((epsilon - 0.1).abs() < EPS);
    }
}

#[test]
fn test_greedy_selection_follows_learned_values() {
    let mut agent = QLearningAgent::with_config(Player::One, config());
    agent.set_evaluating(true);
    let board = Board::from_key_str("110220000").unwrap();
    agent
        .learn(&Transition::terminal(board.encode(), 2, 1.0))
        .unwrap();

    for _ in 0..10 {
        assert_eq!(agent.choose_action(&board).unwrap(), 2);
    }
}

#[test]
fn test_exploring_agents_only_pick_legal_moves() {
    let board = Board::from_key_str("120210210").unwrap();
    let legal = board.legal_moves();
    let mut agents: Vec<Box<dyn Agent>> = vec![
        Box::new(QLearningAgent::with_config(Player::One, config())),
        Box::new(SarsaAgent::with_config(Player::One, config())),
        Box::new(MonteCarloAgent::with_config(Player::One, config())),
    ];

    for agent in &mut agents {
        for _ in 0..50 {
            let pos = agent.select_move(&board, Player::Two).unwrap();
            assert!(legal.contains(&pos));
        }
    }
}
