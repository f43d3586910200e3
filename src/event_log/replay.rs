//! Rebuilding a run from its event log.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde::Serialize;

use crate::debate::{DebateHistory, DebateState};
use crate::validation::JudgeDecision;

use super::event::{DebateEvent, RunModels};
use super::EventLogError;

/// What a log file says about a run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplayedRun {
    pub thesis: String,
    pub models: RunModels,
    pub history: DebateHistory,
    /// Absent when the run ended with a fatal error.
    pub decision: Option<JudgeDecision>,
    pub state: Option<DebateState>,
}

/// Reads every event of a JSONL log; blank lines are skipped.
pub fn read_events(path: impl AsRef<Path>) -> Result<Vec<DebateEvent>, EventLogError> {
    let reader = BufReader::new(File::open(path)?);
    let mut events = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let event = serde_json::from_str(&line).map_err(|err| EventLogError::Malformed {
            line: idx + 1,
            message: err.to_string(),
        })?;
        events.push(event);
    }
    Ok(events)
}

/// Rebuilds the history and outcome of a run from its events.
pub fn reconstruct(events: Vec<DebateEvent>) -> Result<ReplayedRun, EventLogError> {
    let mut events = events.into_iter();
    let (thesis, models) = match events.next() {
        Some(DebateEvent::RunStarted { thesis, models, .. }) => (thesis, models),
        Some(other) => {
            return Err(EventLogError::Malformed {
                line: 1,
                message: format!("expected run_started, found {}", other.kind()),
            })
        }
        None => {
            return Err(EventLogError::Malformed {
                line: 1,
                message: "event log is empty".into(),
            })
        }
    };

    let mut history = DebateHistory::new();
    let mut decision = None;
    let mut state = None;
    for (idx, event) in events.enumerate() {
        match event {
            DebateEvent::AgentTurn(record) | DebateEvent::JudgeProbe(record) => {
                history.push(record.into_turn());
            }
            DebateEvent::JudgeFinal(record) => {
                decision = record.decision.clone();
                history.push(record.into_turn());
            }
            DebateEvent::RunStopped { state: stopped, .. } => state = Some(stopped),
            DebateEvent::RunStarted { .. } => {
                return Err(EventLogError::Malformed {
                    line: idx + 2,
                    message: "second run_started in one log".into(),
                })
            }
        }
    }

    Ok(ReplayedRun {
        thesis,
        models,
        history,
        decision,
        state,
    })
}

/// [`read_events`] followed by [`reconstruct`].
pub fn replay_file(path: impl AsRef<Path>) -> Result<ReplayedRun, EventLogError> {
    reconstruct(read_events(path)?)
}
