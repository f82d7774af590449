//! Persisted policy format shared by all tabular learners.

use std::{collections::BTreeMap, fmt};

use serde::{Deserialize, Serialize};

use crate::{
    Result,
    q_learning::q_table::{ActionValues, QTable, check_action},
    types::StateKey,
};

/// First-visit returns, keyed by state then action
pub type ReturnsMap = BTreeMap<StateKey, BTreeMap<usize, Vec<f64>>>;

/// Which learning rule produced a policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    QLearning,
    Sarsa,
    MonteCarlo,
}

impl Algorithm {
    pub const ALL: [Algorithm; 3] = [Algorithm::QLearning, Algorithm::Sarsa, Algorithm::MonteCarlo];

    /// File stem under the models directory
    pub fn file_stem(self) -> &'static str {
        match self {
            Algorithm::QLearning => "qlearning",
            Algorithm::Sarsa => "sarsa",
            Algorithm::MonteCarlo => "montecarlo",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Algorithm::QLearning => "Q-Learning",
            Algorithm::Sarsa => "SARSA",
            Algorithm::MonteCarlo => "Monte Carlo",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// The durable part of a learner's policy.
///
/// Serialises as `{"qtable": {"000000000": [9 floats], ...}}`; Monte Carlo
/// policies add `"returns": {"<key>": {"<action>": [floats]}}`. Exploration
/// state is not persisted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PolicySnapshot {
    pub qtable: BTreeMap<StateKey, ActionValues>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub returns: Option<ReturnsMap>,
}

impl PolicySnapshot {
    pub fn from_q_table(q_table: &QTable) -> Self {
        Self {
            qtable: q_table.to_map(),
            returns: None,
        }
    }

    pub fn with_returns(mut self, returns: ReturnsMap) -> Self {
        self.returns = Some(returns);
        self
    }

    /// Number of states in the table
    pub fn len(&self) -> usize {
        self.qtable.len()
    }

    pub fn is_empty(&self) -> bool {
        self.qtable.is_empty()
    }

    /// Reject action indices outside the board before anything is restored.
    pub fn validate(&self) -> Result<()> {
        if let Some(returns) = &self.returns {
            for actions in returns.values() {
                for &action in actions.keys() {
                    check_action(action)?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_shape() {
        let mut q_table = QTable::new();
        let key = StateKey::parse("000010000").unwrap();
        q_table.set(&key, 0, 0.25).unwrap();

        let json = serde_json::to_value(PolicySnapshot::from_q_table(&q_table)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "qtable": {"000010000": [0.25, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]}
            })
        );
    }

    #[test]
    fn test_returns_keys_are_strings() {
        let key = StateKey::parse("000000000").unwrap();
        let mut returns = ReturnsMap::new();
        returns.entry(key).or_default().insert(4, vec![1.0, 0.0]);

        let snapshot = PolicySnapshot::default().with_returns(returns);
        let text = serde_json::to_string(&snapshot).unwrap();
        assert!(text.contains(r#""returns":{"000000000":{"4":[1.0,0.0]}}"#));

        let parsed: PolicySnapshot = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, snapshot);
    }

    #[test]
    fn test_bad_keys_rejected() {
        let text = r#"{"qtable": {"00000000x": [0,0,0,0,0,0,0,0,0]}}"#;
        assert!(serde_json::from_str::<PolicySnapshot>(text).is_err());

        let text = r#"{"qtable": {"000000000": [0,0,0]}}"#;
        assert!(serde_json::from_str::<PolicySnapshot>(text).is_err());
    }

    #[test]
    fn test_validate_rejects_out_of_range_returns() {
        let mut returns = ReturnsMap::new();
        returns
            .entry(StateKey::parse("000000000").unwrap())
            .or_default()
            .insert(9, vec![1.0]);
        assert!(PolicySnapshot::default().with_returns(returns).validate().is_err());
    }

    #[test]
    fn test_algorithm_names() {
        assert_eq!(Algorithm::QLearning.file_stem(), "qlearning");
        assert_eq!(Algorithm::MonteCarlo.to_string(), "Monte Carlo");
    }
}
