//! Application layer with dependency injection container.
//!
//! The container owns infrastructure dependencies and provides factory
//! methods for creating agents, following hexagonal architecture principles.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │           Application Layer (app)           │
//! │  ┌──────────────────────────────────────┐   │
//! │  │       App (DI Container)             │   │
//! │  └──────────────┬───────────────────────┘   │
//! │                 │ owns                      │
//! │                 ▼                           │
//! │  ┌──────────────────────────────────────┐   │
//! │  │  Infrastructure (adapters)           │   │
//! │  │  - JsonRepository                    │   │
//! │  │  - MsgPackRepository                 │   │
//! │  │  - InMemoryRepository (testing)      │   │
//! │  └──────────────┬───────────────────────┘   │
//! │                 │ implements                │
//! │                 ▼                           │
//! │  ┌──────────────────────────────────────┐   │
//! │  │  Domain Ports (ports)                │   │
//! │  │  - PolicyRepository, Agent           │   │
//! │  └──────────────────────────────────────┘   │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```
//! use tictactoe_rl::app::{AgentKind, App};
//! use tictactoe_rl::ports::Agent;
//! use tictactoe_rl::tictactoe::Player;
//!
//! let app = App::new();
//! let agent = app.create_agent(AgentKind::Minimax, Player::One);
//! assert_eq!(agent.name(), "Minimax");
//! ```

pub mod config;
pub mod container;

pub use config::{AgentConfig, ModelFormat, RunConfig};
pub use container::{AgentKind, App, AppBuilder};
