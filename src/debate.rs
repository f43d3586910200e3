//! The debate round state machine.

#[path = "debate/config.rs"]
mod config;

#[path = "debate/state.rs"]
mod state;

#[path = "debate/history.rs"]
mod history;

#[path = "debate/outcome.rs"]
mod outcome;

#[path = "debate/orchestrator.rs"]
mod orchestrator;

pub use config::{DebateConfig, RoleSettings, DEFAULT_MODEL};
pub use history::DebateHistory;
pub use orchestrator::Debate;
pub use outcome::DebateOutcome;
pub use state::DebateState;
