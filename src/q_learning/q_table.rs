//! Q-table implementation for tabular learning

use std::collections::{BTreeMap, HashMap};

use crate::{Error, Result, tictactoe::CELL_COUNT, types::StateKey};

/// Action values for one state, indexed by cell position.
///
/// Occupied cells keep whatever was last written (0 by default); they are
/// simply never selected.
pub type ActionValues = [f64; CELL_COUNT];

/// Q-table mapping state keys to per-cell action values
///
/// The table grows when an update writes to a state it has not seen before
/// and is never pruned. Reads of unseen states yield zeros without inserting.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QTable {
    values: HashMap<StateKey, ActionValues>,
}

impl QTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// All nine action values for `state` (zeros if unseen)
    pub fn values(&self, state: &StateKey) -> ActionValues {
        self.values
            .get(state)
            .copied()
            .unwrap_or([0.0; CELL_COUNT])
    }

    /// Get Q-value for a state-action pair
    pub fn get(&self, state: &StateKey, action: usize) -> f64 {
        self.values
            .get(state)
            .and_then(|values| values.get(action))
            .copied()
            .unwrap_or(0.0)
    }

    /// Set Q-value for a state-action pair
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPosition`] for `action >= 9`; the table is
    /// unchanged.
    pub fn set(&mut self, state: &StateKey, action: usize, value: f64) -> Result<()> {
        check_action(action)?;
        self.values
            .entry(state.clone())
            .or_insert([0.0; CELL_COUNT])[action] = value;
        Ok(())
    }

    /// Move Q(s,a) a step of size `alpha` toward `target`.
    ///
    /// Q(s,a) ← Q(s,a) + α[target - Q(s,a)]
    ///
    /// Returns the new value.
    pub fn update_toward(
        &mut self,
        state: &StateKey,
        action: usize,
        target: f64,
        alpha: f64,
    ) -> Result<f64> {
        check_action(action)?;
        let current = self.get(state, action);
        let updated = current + alpha * (target - current);
        self.set(state, action, updated)?;
        Ok(updated)
    }

    /// Highest-valued legal action; ties go to the first in `legal_actions`
    pub fn greedy_action(&self, state: &StateKey, legal_actions: &[usize]) -> Option<usize> {
        let values = self.values(state);
        let (&first, rest) = legal_actions.split_first()?;
        let mut best = first;
        for &action in rest {
            if values[action] > values[best] {
                best = action;
            }
        }
        Some(best)
    }

    /// Value of the greedy legal action, 0 when there is none
    pub fn max_q(&self, state: &StateKey, legal_actions: &[usize]) -> f64 {
        self.greedy_action(state, legal_actions)
            .map(|action| self.get(state, action))
            .unwrap_or(0.0)
    }

    pub fn contains(&self, state: &StateKey) -> bool {
        self.values.contains_key(state)
    }

    /// Number of states stored
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&StateKey, &ActionValues)> {
        self.values.iter()
    }

    /// Sorted copy for persistence
    pub fn to_map(&self) -> BTreeMap<StateKey, ActionValues> {
        self.values
            .iter()
            .map(|(key, values)| (key.clone(), *values))
            .collect()
    }

    pub fn from_map(map: BTreeMap<StateKey, ActionValues>) -> Self {
        Self {
            values: map.into_iter().collect(),
        }
    }
}

pub(crate) fn check_action(action: usize) -> Result<()> {
    if action < CELL_COUNT {
        Ok(())
    } else {
        Err(Error::InvalidPosition { position: action })
    }
}
