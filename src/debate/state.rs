use std::fmt;

use serde::{Deserialize, Serialize};

/// Lifecycle of a debate run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DebateState {
    Running,
    StoppedByStopPhrase,
    StoppedByConvergence,
    StoppedByMaxRounds,
}

impl DebateState {
    pub fn as_str(self) -> &'static str {
        match self {
            DebateState::Running => "running",
            DebateState::StoppedByStopPhrase => "stopped_by_stop_phrase",
            DebateState::StoppedByConvergence => "stopped_by_convergence",
            DebateState::StoppedByMaxRounds => "stopped_by_max_rounds",
        }
    }

    pub fn is_stopped(self) -> bool {
        self != DebateState::Running
    }
}

impl fmt::Display for DebateState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
