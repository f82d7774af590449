//! Full-history return bookkeeping for first-visit Monte Carlo.

use std::collections::HashMap;

use crate::{Result, q_learning::ReturnsMap, types::StateKey};

/// Every accepted return per (state, action), never windowed or pruned.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReturnsTable {
    returns: HashMap<StateKey, HashMap<usize, Vec<f64>>>,
}

impl ReturnsTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `value` and return the new arithmetic mean for the pair.
    pub fn record(&mut self, state: &StateKey, action: usize, value: f64) -> f64 {
        let history = self
            .returns
            .entry(state.clone())
            .or_default()
            .entry(action)
            .or_default();
        history.push(value);
        history.iter().sum::<f64>() / history.len() as f64
    }

    pub fn history(&self, state: &StateKey, action: usize) -> &[f64] {
        self.returns
            .get(state)
            .and_then(|actions| actions.get(&action))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn mean(&self, state: &StateKey, action: usize) -> Option<f64> {
        let history = self.history(state, action);
        if history.is_empty() {
            None
        } else {
            Some(history.iter().sum::<f64>() / history.len() as f64)
        }
    }

    /// Number of states with at least one recorded return
    pub fn len(&self) -> usize {
        self.returns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.returns.is_empty()
    }

    pub fn to_map(&self) -> ReturnsMap {
        self.returns
            .iter()
            .map(|(state, actions)| {
                let actions = actions
                    .iter()
                    .map(|(&action, history)| (action, history.clone()))
                    .collect();
                (state.clone(), actions)
            })
            .collect()
    }

    pub fn from_map(map: ReturnsMap) -> Result<Self> {
        let mut returns: HashMap<StateKey, HashMap<usize, Vec<f64>>> = HashMap::new();
        for (state, actions) in map {
            for (action, history) in actions {
                crate::q_learning::q_table::check_action(action)?;
                returns
                    .entry(state.clone())
                    .or_default()
                    .insert(action, history);
            }
        }
        Ok(Self { returns })
    }
}
