use std::fmt;

use serde::{Deserialize, Serialize};

use crate::validation::{TemplateSpec, CONTRA_TEMPLATE, PRO_TEMPLATE};

/// The four speaking slots of a debate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Pro,
    Contra,
    JudgeProbe,
    JudgeFinal,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Pro => "pro",
            Role::Contra => "contra",
            Role::JudgeProbe => "judge_probe",
            Role::JudgeFinal => "judge_final",
        }
    }

    pub fn is_judge(self) -> bool {
        matches!(self, Role::JudgeProbe | Role::JudgeFinal)
    }

    /// The opposing agent; judges have none.
    pub fn opponent(self) -> Option<Role> {
        match self {
            Role::Pro => Some(Role::Contra),
            Role::Contra => Some(Role::Pro),
            Role::JudgeProbe | Role::JudgeFinal => None,
        }
    }

    /// Line template for agent roles.
    pub fn template(self) -> Option<&'static TemplateSpec> {
        match self {
            Role::Pro => Some(&PRO_TEMPLATE),
            Role::Contra => Some(&CONTRA_TEMPLATE),
            Role::JudgeProbe | Role::JudgeFinal => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
