use serde::{Deserialize, Serialize};

use crate::turn::{Role, TurnOutput};

/// Append-only record of the accepted outputs of one run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DebateHistory {
    turns: Vec<TurnOutput>,
}

impl DebateHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, turn: TurnOutput) {
        self.turns.push(turn);
    }

    pub fn turns(&self) -> &[TurnOutput] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// The most recent accepted output of `role`.
    pub fn last_of(&self, role: Role) -> Option<&TurnOutput> {
        self.turns.iter().rev().find(|turn| turn.role == role)
    }

    pub fn turns_of(&self, role: Role) -> impl Iterator<Item = &TurnOutput> {
        self.turns.iter().filter(move |turn| turn.role == role)
    }

    /// Agent texts grouped per round, as `(round, pro, contra)`.
    ///
    /// A side that did not speak in a round shows up as an empty string.
    pub fn exchanges(&self) -> Vec<(u32, &str, &str)> {
        let mut rounds: Vec<(u32, &str, &str)> = Vec::new();
        for turn in self.turns.iter().filter(|turn| !turn.role.is_judge()) {
            if rounds.last().map(|entry| entry.0) != Some(turn.round) {
                rounds.push((turn.round, "", ""));
            }
            if let Some(slot) = rounds.last_mut() {
                match turn.role {
                    Role::Pro => slot.1 = turn.text.as_str(),
                    Role::Contra => slot.2 = turn.text.as_str(),
                    Role::JudgeProbe | Role::JudgeFinal => {}
                }
            }
        }
        rounds
    }

    /// Number of rounds in which the agents spoke.
    pub fn rounds(&self) -> u32 {
        self.turns
            .iter()
            .filter(|turn| !turn.role.is_judge())
            .map(|turn| turn.round)
            .max()
            .unwrap_or(0)
    }
}

impl From<Vec<TurnOutput>> for DebateHistory {
    fn from(turns: Vec<TurnOutput>) -> Self {
        Self { turns }
    }
}
