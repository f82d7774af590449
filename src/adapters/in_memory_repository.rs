//! In-memory policy repository for testing.
//!
//! This adapter provides a pure in-memory implementation of PolicyRepository,
//! enabling fast tests without any file system I/O.

use std::{
    collections::HashMap,
    path::Path,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use crate::{Result, error::Error, ports::PolicyRepository, q_learning::PolicySnapshot};

/// In-memory repository for testing.
///
/// Stores serialized snapshots in a shared HashMap keyed by path.
///
/// # Examples
///
/// ```
/// use tictactoe_rl::adapters::InMemoryRepository;
/// use tictactoe_rl::ports::PolicyRepository;
/// use tictactoe_rl::q_learning::PolicySnapshot;
/// use std::path::Path;
///
/// let repo = InMemoryRepository::new();
/// repo.save(&PolicySnapshot::default(), Path::new("models/sarsa.json"))?;
/// assert!(repo.contains(Path::new("models/sarsa.json")));
/// let loaded = repo.load(Path::new("models/sarsa.json"))?;
/// assert!(loaded.is_empty());
/// # Ok::<(), tictactoe_rl::Error>(())
/// ```
///
/// # Thread Safety
///
/// All clones share the same underlying storage.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    storage: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl InMemoryRepository {
    /// Create a new empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }

    fn storage(&self) -> MutexGuard<'_, HashMap<String, Vec<u8>>> {
        self.storage.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Number of policies currently stored.
    pub fn count(&self) -> usize {
        self.storage().len()
    }

    /// Clear all stored policies.
    pub fn clear(&self) {
        self.storage().clear();
    }

    /// Check if a policy exists at the given path.
    pub fn contains(&self, path: &Path) -> bool {
        self.storage().contains_key(path.to_string_lossy().as_ref())
    }
}

impl PolicyRepository for InMemoryRepository {
    fn save(&self, snapshot: &PolicySnapshot, path: &Path) -> Result<()> {
        let key = path.to_string_lossy().to_string();

        let bytes = rmp_serde::to_vec_named(snapshot).map_err(|e| Error::SerializationContext {
            operation: "serialize policy for in-memory storage".to_string(),
            message: e.to_string(),
        })?;

        self.storage().insert(key, bytes);
        Ok(())
    }

    fn load(&self, path: &Path) -> Result<PolicySnapshot> {
        let storage = self.storage();
        let bytes = storage
            .get(path.to_string_lossy().as_ref())
            .ok_or_else(|| Error::MissingModel {
                path: path.display().to_string(),
            })?;

        let snapshot: PolicySnapshot =
            rmp_serde::from_slice(bytes).map_err(|e| Error::SerializationContext {
                operation: "deserialize policy from in-memory storage".to_string(),
                message: e.to_string(),
            })?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    fn extension(&self) -> &'static str {
        "json"
    }
}
