//! Ports (trait boundaries) for external dependencies.
//!
//! This module defines the interfaces between the domain layer and
//! infrastructure. The traits are owned by the domain and implemented by
//! strategies, storage adapters and progress reporters.

pub mod agent;
pub mod observer;
pub mod repository;

pub use agent::{Agent, LearningAgent, Transition};
pub use observer::Observer;
pub use repository::PolicyRepository;
