//! JSON implementation of the policy repository.
//!
//! This is the default on-disk format: `{"qtable": {...}}`, plus `"returns"`
//! for Monte Carlo policies.

use std::{
    io::{BufReader, BufWriter, Write},
    path::Path,
};

use super::{create_file, open_file};
use crate::{Result, error::Error, ports::PolicyRepository, q_learning::PolicySnapshot};

/// JSON-based policy repository.
///
/// # Examples
///
/// ```no_run
/// use tictactoe_rl::adapters::JsonRepository;
/// use tictactoe_rl::ports::PolicyRepository;
/// use tictactoe_rl::q_learning::PolicySnapshot;
/// use std::path::Path;
///
/// let repo = JsonRepository::new();
/// repo.save(&PolicySnapshot::default(), Path::new("models/qlearning.json"))?;
/// let loaded = repo.load(Path::new("models/qlearning.json"))?;
/// assert!(loaded.is_empty());
/// # Ok::<(), tictactoe_rl::Error>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRepository;

impl JsonRepository {
    pub fn new() -> Self {
        Self
    }
}

impl PolicyRepository for JsonRepository {
    fn save(&self, snapshot: &PolicySnapshot, path: &Path) -> Result<()> {
        let mut writer = BufWriter::new(create_file(path)?);
        serde_json::to_writer(&mut writer, snapshot)?;
        writer.flush().map_err(|source| Error::Io {
            operation: format!("write file {path:?}"),
            source,
        })?;
        Ok(())
    }

    fn load(&self, path: &Path) -> Result<PolicySnapshot> {
        let reader = BufReader::new(open_file(path)?);
        let snapshot: PolicySnapshot =
            serde_json::from_reader(reader).map_err(|e| Error::SerializationContext {
                operation: format!("parse policy {path:?}"),
                message: e.to_string(),
            })?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    fn extension(&self) -> &'static str {
        "json"
    }
}
