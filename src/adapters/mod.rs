//! Adapters implementing domain ports.
//!
//! This module contains infrastructure implementations of the traits defined
//! in the ports module. Following hexagonal architecture, adapters depend on
//! domain ports, not the other way around.

use std::{fs::File, path::Path};

use crate::{Error, Result};

pub mod in_memory_repository;
pub mod json_repository;
pub mod msgpack_repository;

pub use in_memory_repository::InMemoryRepository;
pub use json_repository::JsonRepository;
pub use msgpack_repository::MsgPackRepository;

/// Create `path` for writing, creating missing parent directories first.
fn create_file(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| Error::Io {
            operation: format!("create directory {parent:?}"),
            source,
        })?;
    }
    File::create(path).map_err(|source| Error::Io {
        operation: format!("create file {path:?}"),
        source,
    })
}

/// Open `path` for reading; a missing file maps to [`Error::MissingModel`].
fn open_file(path: &Path) -> Result<File> {
    File::open(path).map_err(|source| match source.kind() {
        std::io::ErrorKind::NotFound => Error::MissingModel {
            path: path.display().to_string(),
        },
        _ => Error::Io {
            operation: format!("open file {path:?}"),
            source,
        },
    })
}
