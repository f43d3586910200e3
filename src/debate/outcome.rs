use std::path::PathBuf;

use serde::Serialize;

use crate::chat::Usage;
use crate::validation::JudgeDecision;

use super::history::DebateHistory;
use super::state::DebateState;

/// Result of a completed run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DebateOutcome {
    pub thesis: String,
    pub history: DebateHistory,
    /// The final judge decision; the run's terminal artifact.
    pub decision: JudgeDecision,
    pub state: DebateState,
    pub rounds: u32,
    /// Token usage summed over every attempt, where the endpoint reports it.
    pub usage: Usage,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_path: Option<PathBuf>,
}
