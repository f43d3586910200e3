use crate::chat::{ChatMessage, ChatProvider, ChatRequest, Usage};
use crate::debate::RoleSettings;
use crate::error::LLMError;
use crate::prompts::corrective_instruction;
use crate::validation::{truncate, validate, Accepted, JudgeDecision, ValidationRules};

use super::output::{RejectedAttempt, TurnOutcome, TurnOutput};
use super::role::Role;

/// Retries after the first attempt; three calls in total.
pub const DEFAULT_RETRY_BOUND: u32 = 2;

/// Everything one turn needs besides the client.
#[derive(Debug, Clone)]
pub struct TurnContext<'a> {
    pub round: u32,
    /// The initial message list; corrective instructions are appended to a copy.
    pub messages: Vec<ChatMessage>,
    pub settings: &'a RoleSettings,
    pub rules: ValidationRules<'a>,
}

/// Drives one role's turn through the bounded validate-and-retry loop.
pub struct TurnExecutor<'c> {
    client: &'c dyn ChatProvider,
    retry_bound: u32,
}

impl<'c> TurnExecutor<'c> {
    pub fn new(client: &'c dyn ChatProvider, retry_bound: u32) -> Self {
        Self {
            client,
            retry_bound,
        }
    }

    /// Runs a turn to an accepted or fallback output.
    ///
    /// Validation failures never surface as errors; only the completion
    /// client can fail a turn.
    pub async fn execute_turn(
        &self,
        role: Role,
        ctx: &TurnContext<'_>,
    ) -> Result<TurnOutput, LLMError> {
        let max_attempts = self.retry_bound.saturating_add(1);
        let mut messages = ctx.messages.clone();
        let mut rejected = Vec::new();
        let mut usage = Usage::default();
        let mut last_text = String::new();

        for attempt in 1..=max_attempts {
            let request = ChatRequest::new(&messages, &ctx.settings.model)
                .temperature(ctx.settings.temperature)
                .max_output_chars(ctx.settings.max_chars)
                .json_output(role.is_judge());
            let response = self.client.chat(&request).await?;
            if let Some(reported) = response.usage() {
                usage.accumulate(&reported);
            }
            let text = response.text().unwrap_or_default();

            match validate(&text, &ctx.rules) {
                Ok(accepted) => {
                    let decision = match accepted {
                        Accepted::Decision(decision) => Some(decision),
                        Accepted::Argument => None,
                    };
                    return Ok(TurnOutput {
                        role,
                        round: ctx.round,
                        text: truncate(&text, ctx.settings.max_chars),
                        raw: text,
                        outcome: TurnOutcome::Accepted { attempts: attempt },
                        rejected,
                        decision,
                        usage,
                    });
                }
                Err(rejection) => {
                    log::debug!(
                        "round {} {role} attempt {attempt}/{max_attempts} rejected: {rejection}",
                        ctx.round
                    );
                    if attempt < max_attempts {
                        messages.push(
                            ChatMessage::user()
                                .content(corrective_instruction(role, &rejection))
                                .build(),
                        );
                    }
                    rejected.push(RejectedAttempt {
                        attempt,
                        text: text.clone(),
                        rejection,
                    });
                    last_text = text;
                }
            }
        }

        log::warn!(
            "round {} {role}: no valid output after {max_attempts} attempts, using fallback",
            ctx.round
        );
        let decision = role.is_judge().then(|| JudgeDecision::fallback(&last_text));
        Ok(TurnOutput {
            role,
            round: ctx.round,
            text: truncate(&last_text, ctx.settings.max_chars),
            raw: last_text,
            outcome: TurnOutcome::Fallback {
                attempts: max_attempts,
            },
            rejected,
            decision,
            usage,
        })
    }
}
