//! MessagePack implementation of the policy repository.
//!
//! This adapter implements the PolicyRepository port using rmp_serde for
//! compact binary serialization.

use std::{
    io::{BufReader, BufWriter, Write},
    path::Path,
};

use super::{create_file, open_file};
use crate::{Result, error::Error, ports::PolicyRepository, q_learning::PolicySnapshot};

/// MessagePack-based policy repository.
///
/// Provides persistent storage using the MessagePack binary format via
/// rmp_serde. Tables are a fraction of the JSON size.
#[derive(Debug, Clone, Copy, Default)]
pub struct MsgPackRepository;

impl MsgPackRepository {
    /// Create a new MessagePack repository.
    pub fn new() -> Self {
        Self
    }
}

impl PolicyRepository for MsgPackRepository {
    fn save(&self, snapshot: &PolicySnapshot, path: &Path) -> Result<()> {
        let mut writer = BufWriter::new(create_file(path)?);

        rmp_serde::encode::write_named(&mut writer, snapshot).map_err(|e| {
            Error::SerializationContext {
                operation: "serialize policy to MessagePack".to_string(),
                message: e.to_string(),
            }
        })?;

        writer.flush().map_err(|source| Error::Io {
            operation: format!("write file {path:?}"),
            source,
        })
    }

    fn load(&self, path: &Path) -> Result<PolicySnapshot> {
        let reader = BufReader::new(open_file(path)?);

        let snapshot: PolicySnapshot =
            rmp_serde::decode::from_read(reader).map_err(|e| Error::SerializationContext {
                operation: "deserialize policy from MessagePack".to_string(),
                message: e.to_string(),
            })?;
        snapshot.validate()?;

        Ok(snapshot)
    }

    fn extension(&self) -> &'static str {
        "msgpack"
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::{q_learning::ReturnsMap, types::StateKey};

    #[test]
    fn test_msgpack_roundtrip_with_returns() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let file_path = temp_dir.path().join("montecarlo.msgpack");

        let key = StateKey::parse("000000000").unwrap();
        let mut snapshot = PolicySnapshot::default();
        snapshot.qtable.insert(key.clone(), [0.25; 9]);
        let mut returns = ReturnsMap::new();
        returns.entry(key).or_default().insert(4, vec![0.5, 0.0]);
        let snapshot = snapshot.with_returns(returns);

        let repo = MsgPackRepository::new();
        repo.save(&snapshot, &file_path).expect("Failed to save");
        let loaded = repo.load(&file_path).expect("Failed to load");

        assert_eq!(loaded, snapshot);
    }

    #[test]
    fn test_load_nonexistent_returns_error() {
        let temp_dir = TempDir::new().unwrap();
        let result = MsgPackRepository::new().load(&temp_dir.path().join("nope.msgpack"));
        assert!(matches!(result, Err(Error::MissingModel { .. })));
    }
}
