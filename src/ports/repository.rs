//! Repository port for policy persistence.
//!
//! This module defines the trait boundary between the learners and the storage
//! mechanism used for their Q-tables.

use std::path::Path;

use crate::{Result, q_learning::PolicySnapshot};

/// Port for persisting and loading learned policies.
///
/// This trait abstracts the storage mechanism, allowing different
/// implementations (JSON, MessagePack, in-memory) without coupling the
/// learners to a specific format.
///
/// # Examples
///
/// ```no_run
/// use tictactoe_rl::adapters::JsonRepository;
/// use tictactoe_rl::ports::PolicyRepository;
/// use tictactoe_rl::q_learning::PolicySnapshot;
/// use std::path::Path;
///
/// fn save_snapshot<R: PolicyRepository>(
///     repo: &R,
///     snapshot: &PolicySnapshot,
///     path: &Path,
/// ) -> tictactoe_rl::Result<()> {
///     repo.save(snapshot, path)
/// }
/// ```
pub trait PolicyRepository {
    /// Save a policy snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The path cannot be created or written to
    /// - Serialization fails
    fn save(&self, snapshot: &PolicySnapshot, path: &Path) -> Result<()>;

    /// Load a policy snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::MissingModel`] if nothing is stored at `path`,
    /// or a serialization error if the stored data is corrupt.
    fn load(&self, path: &Path) -> Result<PolicySnapshot>;

    /// File extension used by this repository (without the dot)
    fn extension(&self) -> &'static str;
}
