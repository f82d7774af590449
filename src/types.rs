//! Type-safe wrappers for board encodings
//!
//! Every Q-table in the crate is keyed by [`StateKey`], the nine-digit
//! row-major encoding of a board. Wrapping the string keeps malformed keys out
//! of the tables and out of persisted policies.

use std::{borrow::Borrow, fmt};

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Number of characters in a state key (one per cell).
pub const STATE_KEY_LEN: usize = 9;

/// Canonical board encoding: one digit per cell, `0` empty, `1` player one,
/// `2` player two.
///
/// # Examples
///
/// ```
/// use tictactoe_rl::types::StateKey;
///
/// let key = StateKey::parse("000010000")?;
/// assert_eq!(key.as_str(), "000010000");
/// assert!(StateKey::parse("00001000").is_err());
/// assert!(StateKey::parse("000030000").is_err());
/// # Ok::<(), tictactoe_rl::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StateKey(String);

impl StateKey {
    /// Validate and wrap a key string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidStateKey`] unless the input is exactly nine
    /// characters drawn from `0`, `1`, `2`.
    pub fn parse(key: &str) -> Result<Self> {
        let invalid = |reason: String| Error::InvalidStateKey {
            key: key.to_string(),
            reason,
        };

        if key.len() != STATE_KEY_LEN {
            return Err(invalid(format!(
                "expected {STATE_KEY_LEN} characters, got {}",
                key.len()
            )));
        }
        if let Some((position, character)) = key
            .chars()
            .enumerate()
            .find(|(_, c)| !matches!(c, '0' | '1' | '2'))
        {
            return Err(invalid(format!(
                "character '{character}' at position {position} is not 0, 1 or 2"
            )));
        }

        Ok(Self(key.to_string()))
    }

    /// Wrap a string produced by [`crate::tictactoe::Board::encode`].
    pub(crate) fn from_encoded(encoded: String) -> Self {
        debug_assert_eq!(encoded.len(), STATE_KEY_LEN);
        Self(encoded)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for StateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for StateKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for StateKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for StateKey {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<StateKey> for String {
    fn from(key: StateKey) -> Self {
        key.0
    }
}
