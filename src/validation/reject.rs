use std::fmt;

use serde::{Deserialize, Serialize};

/// Why a candidate output was rejected.
///
/// Every variant is recoverable by retrying the turn; none of them ever
/// escapes the turn executor as an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    TemplateViolation,
    Mirroring,
    SelfRepeat,
    JudgeFormatInvalid,
}

impl RejectReason {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::TemplateViolation => "template_violation",
            Self::Mirroring => "mirroring",
            Self::SelfRepeat => "self_repeat",
            Self::JudgeFormatInvalid => "judge_format_invalid",
        }
    }
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A rejection with a human-readable detail for logs and corrective prompts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rejection {
    pub reason: RejectReason,
    pub detail: String,
}

impl Rejection {
    pub fn new(reason: RejectReason, detail: impl Into<String>) -> Self {
        Self {
            reason,
            detail: detail.into(),
        }
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.reason, self.detail)
    }
}
