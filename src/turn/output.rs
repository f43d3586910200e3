use std::fmt;

use serde::{Deserialize, Serialize};

use crate::chat::Usage;
use crate::validation::{JudgeDecision, Rejection};

use super::role::Role;

/// How a turn's text came to be accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TurnOutcome {
    /// Passed validation on attempt number `attempts`.
    Accepted { attempts: u32 },
    /// Every attempt was rejected; the last one was kept.
    Fallback { attempts: u32 },
}

impl TurnOutcome {
    pub fn attempts(self) -> u32 {
        match self {
            TurnOutcome::Accepted { attempts } | TurnOutcome::Fallback { attempts } => attempts,
        }
    }

    pub fn is_fallback(self) -> bool {
        matches!(self, TurnOutcome::Fallback { .. })
    }
}

impl fmt::Display for TurnOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            TurnOutcome::Accepted { attempts: 1 } => f.write_str("accepted"),
            TurnOutcome::Accepted { attempts } => {
                write!(f, "accepted_after_retry_{}", attempts.saturating_sub(1))
            }
            TurnOutcome::Fallback { .. } => f.write_str("fallback"),
        }
    }
}

/// Raw text of an attempt that failed validation, with the reason.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RejectedAttempt {
    pub attempt: u32,
    pub text: String,
    pub rejection: Rejection,
}

/// An accepted (or fallback) output of one role in one round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnOutput {
    pub role: Role,
    pub round: u32,
    /// Accepted text, already cut to the role's character budget.
    pub text: String,
    /// The same output before the cut; similarity and stop phrases read this.
    #[serde(default)]
    pub raw: String,
    pub outcome: TurnOutcome,
    #[serde(default)]
    pub rejected: Vec<RejectedAttempt>,
    /// Present on judge turns only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decision: Option<JudgeDecision>,
    #[serde(default)]
    pub usage: Usage,
}

impl TurnOutput {
    /// The uncut output, or the cut text for records written without one.
    pub fn full_text(&self) -> &str {
        if self.raw.is_empty() {
            &self.text
        } else {
            &self.raw
        }
    }
}
