use serde::{Deserialize, Serialize};

use crate::error::DebateError;
use crate::turn::{Role, DEFAULT_RETRY_BOUND};
use crate::validation::DEFAULT_SIMILARITY_THRESHOLD;

pub const DEFAULT_MODEL: &str = "qwen2.5-7b-instruct";

/// Model, sampling temperature and output budget of one role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleSettings {
    pub model: String,
    pub temperature: f32,
    /// Accepted output is cut to this many characters.
    pub max_chars: usize,
}

impl RoleSettings {
    pub fn new(model: impl Into<String>, temperature: f32, max_chars: usize) -> Self {
        Self {
            model: model.into(),
            temperature,
            max_chars,
        }
    }
}

/// Typed configuration consumed by [`crate::Debate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebateConfig {
    pub pro: RoleSettings,
    pub contra: RoleSettings,
    /// Shared by probe and final judge turns.
    pub judge: RoleSettings,
    pub max_rounds: u32,
    pub convergence_delta: f64,
    pub stop_phrases: Vec<String>,
    pub similarity_threshold: f64,
    pub retry_bound: u32,
}

impl Default for DebateConfig {
    fn default() -> Self {
        Self {
            pro: RoleSettings::new(DEFAULT_MODEL, 0.8, 700),
            contra: RoleSettings::new(DEFAULT_MODEL, 0.2, 700),
            judge: RoleSettings::new(DEFAULT_MODEL, 0.2, 900),
            max_rounds: 3,
            convergence_delta: 0.02,
            stop_phrases: vec!["agreement reached".into(), "no new points".into()],
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
            retry_bound: DEFAULT_RETRY_BOUND,
        }
    }
}

impl DebateConfig {
    pub fn role(&self, role: Role) -> &RoleSettings {
        match role {
            Role::Pro => &self.pro,
            Role::Contra => &self.contra,
            Role::JudgeProbe | Role::JudgeFinal => &self.judge,
        }
    }

    /// Checks the invariants the state machine relies on.
    pub fn check(&self) -> Result<(), DebateError> {
        if self.max_rounds < 1 {
            return Err(DebateError::InvalidConfig(
                "max_rounds must be at least 1".into(),
            ));
        }
        if !self.convergence_delta.is_finite() || self.convergence_delta < 0.0 {
            return Err(DebateError::InvalidConfig(format!(
                "convergence_delta must be a finite value >= 0, got {}",
                self.convergence_delta
            )));
        }
        if !(self.similarity_threshold > 0.0 && self.similarity_threshold <= 1.0) {
            return Err(DebateError::InvalidConfig(format!(
                "similarity_threshold must be in (0, 1], got {}",
                self.similarity_threshold
            )));
        }
        for (name, settings) in [("pro", &self.pro), ("contra", &self.contra), ("judge", &self.judge)] {
            if settings.model.trim().is_empty() {
                return Err(DebateError::InvalidConfig(format!("{name} model is empty")));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_pass_the_check() {
        assert!(DebateConfig::default().check().is_ok());
    }

    #[test]
    fn zero_rounds_is_rejected() {
        let config = DebateConfig {
            max_rounds: 0,
            ..DebateConfig::default()
        };
        assert!(matches!(config.check(), Err(DebateError::InvalidConfig(_))));
    }

    #[test]
    fn negative_delta_is_rejected() {
        let config = DebateConfig {
            convergence_delta: -0.1,
            ..DebateConfig::default()
        };
        assert!(config.check().is_err());
    }

    #[test]
    fn judge_roles_share_settings() {
        let config = DebateConfig::default();
        assert_eq!(config.role(Role::JudgeProbe), config.role(Role::JudgeFinal));
        assert_eq!(config.role(Role::Pro).temperature, 0.8);
    }
}
