use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::chat::Usage;
use crate::debate::{DebateConfig, DebateState};
use crate::turn::{RejectedAttempt, Role, TurnOutcome, TurnOutput};
use crate::validation::JudgeDecision;

/// Models used by each role, recorded once per run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunModels {
    pub pro: String,
    pub contra: String,
    pub judge: String,
}

/// One turn as written to the log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnRecord {
    pub round: u32,
    pub role: Role,
    pub text: String,
    /// Uncut output; equal to `text` when nothing was cut.
    #[serde(default)]
    pub raw: String,
    pub outcome: TurnOutcome,
    pub attempts: u32,
    #[serde(default)]
    pub rejected: Vec<RejectedAttempt>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decision: Option<JudgeDecision>,
    #[serde(default)]
    pub usage: Usage,
    pub ts: DateTime<Utc>,
}

impl TurnRecord {
    pub fn from_turn(turn: &TurnOutput) -> Self {
        Self {
            round: turn.round,
            role: turn.role,
            text: turn.text.clone(),
            raw: turn.raw.clone(),
            outcome: turn.outcome,
            attempts: turn.outcome.attempts(),
            rejected: turn.rejected.clone(),
            decision: turn.decision.clone(),
            usage: turn.usage.clone(),
            ts: Utc::now(),
        }
    }

    pub fn into_turn(self) -> TurnOutput {
        TurnOutput {
            role: self.role,
            round: self.round,
            text: self.text,
            raw: self.raw,
            outcome: self.outcome,
            rejected: self.rejected,
            decision: self.decision,
            usage: self.usage,
        }
    }
}

/// A single line of the event log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DebateEvent {
    RunStarted {
        thesis: String,
        models: RunModels,
        max_rounds: u32,
        ts: DateTime<Utc>,
    },
    AgentTurn(TurnRecord),
    JudgeProbe(TurnRecord),
    JudgeFinal(TurnRecord),
    RunStopped {
        round: u32,
        state: DebateState,
        ts: DateTime<Utc>,
    },
}

impl DebateEvent {
    pub fn run_started(thesis: &str, config: &DebateConfig) -> Self {
        DebateEvent::RunStarted {
            thesis: thesis.to_string(),
            models: RunModels {
                pro: config.pro.model.clone(),
                contra: config.contra.model.clone(),
                judge: config.judge.model.clone(),
            },
            max_rounds: config.max_rounds,
            ts: Utc::now(),
        }
    }

    /// Wraps a turn in the event kind matching its role.
    pub fn turn(turn: &TurnOutput) -> Self {
        let record = TurnRecord::from_turn(turn);
        match turn.role {
            Role::Pro | Role::Contra => DebateEvent::AgentTurn(record),
            Role::JudgeProbe => DebateEvent::JudgeProbe(record),
            Role::JudgeFinal => DebateEvent::JudgeFinal(record),
        }
    }

    pub fn run_stopped(round: u32, state: DebateState) -> Self {
        DebateEvent::RunStopped {
            round,
            state,
            ts: Utc::now(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            DebateEvent::RunStarted { .. } => "run_started",
            DebateEvent::AgentTurn(_) => "agent_turn",
            DebateEvent::JudgeProbe(_) => "judge_probe",
            DebateEvent::JudgeFinal(_) => "judge_final",
            DebateEvent::RunStopped { .. } => "run_stopped",
        }
    }

    pub fn turn_record(&self) -> Option<&TurnRecord> {
        match self {
            DebateEvent::AgentTurn(record)
            | DebateEvent::JudgeProbe(record)
            | DebateEvent::JudgeFinal(record) => Some(record),
            DebateEvent::RunStarted { .. } | DebateEvent::RunStopped { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn judge_turn() -> TurnOutput {
        TurnOutput {
            role: Role::JudgeFinal,
            round: 2,
            text: "{}".into(),
            raw: "{} ".into(),
            outcome: TurnOutcome::Accepted { attempts: 2 },
            rejected: Vec::new(),
            decision: Some(JudgeDecision::fallback("x")),
            usage: Usage::default(),
        }
    }

    #[test]
    fn turn_events_are_flat_and_tagged() {
        let value = serde_json::to_value(DebateEvent::turn(&judge_turn())).expect("json");
        assert_eq!(value["kind"], "judge_final");
        assert_eq!(value["round"], 2);
        assert_eq!(value["role"], "judge_final");
        assert_eq!(value["attempts"], 2);
        assert_eq!(value["raw"], "{} ");
        assert_eq!(value["outcome"]["status"], "accepted");
        assert!(value["ts"].as_str().is_some());
        assert!(value["decision"]["probability"].is_number());
    }

    #[test]
    fn turn_record_round_trips_to_the_same_turn() {
        let turn = judge_turn();
        let line = serde_json::to_string(&DebateEvent::turn(&turn)).expect("json");
        let event: DebateEvent = serde_json::from_str(&line).expect("parse");
        let record = event.turn_record().cloned().expect("turn record");
        assert_eq!(record.into_turn(), turn);
    }

    #[test]
    fn records_without_raw_text_still_parse() {
        let line = r#"{"kind":"agent_turn","round":1,"role":"pro","text":"- PRO1: a","outcome":{"status":"accepted","attempts":1},"attempts":1,"ts":"2026-01-01T00:00:00Z"}"#;
        let event: DebateEvent = serde_json::from_str(line).expect("parse");
        let turn = event.turn_record().cloned().expect("record").into_turn();
        assert!(turn.raw.is_empty());
        assert_eq!(turn.full_text(), "- PRO1: a");
    }

    #[test]
    fn stop_event_carries_state() {
        let value = serde_json::to_value(DebateEvent::run_stopped(3, DebateState::StoppedByMaxRounds))
            .expect("json");
        assert_eq!(value["kind"], "run_stopped");
        assert_eq!(value["state"], "stopped_by_max_rounds");
    }
}
