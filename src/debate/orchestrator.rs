use crate::chat::{ChatMessage, ChatProvider, Usage};
use crate::error::DebateError;
use crate::event_log::{DebateEvent, EventSink};
use crate::prompts;
use crate::turn::{Role, TurnContext, TurnExecutor, TurnOutput};
use crate::validation::{stop_phrase_hit, JudgeDecision, ValidationRules};

use super::config::DebateConfig;
use super::history::DebateHistory;
use super::outcome::DebateOutcome;
use super::state::DebateState;

/// A configured debate that can be run against any number of theses.
pub struct Debate<C> {
    client: C,
    config: DebateConfig,
}

/// Mutable state of one `run` call.
struct RunContext<'r> {
    thesis: &'r str,
    round: u32,
    state: DebateState,
    history: DebateHistory,
    /// Probability of the latest non-fallback probe.
    last_probe: Option<f64>,
    usage: Usage,
    sink: &'r mut dyn EventSink,
}

impl RunContext<'_> {
    fn accept(&mut self, turn: TurnOutput) -> Result<(), DebateError> {
        self.sink.record(&DebateEvent::turn(&turn))?;
        self.usage.accumulate(&turn.usage);
        self.history.push(turn);
        Ok(())
    }
}

impl<C: ChatProvider> Debate<C> {
    pub fn new(client: C, config: DebateConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &DebateConfig {
        &self.config
    }

    /// Runs the debate to a final judge decision.
    ///
    /// Every turn is recorded in `sink` before the next one starts. A
    /// completion error ends the run without a decision; events recorded
    /// up to that point stay valid.
    pub async fn run(
        &self,
        thesis: &str,
        sink: &mut dyn EventSink,
    ) -> Result<DebateOutcome, DebateError> {
        self.config.check()?;
        sink.record(&DebateEvent::run_started(thesis, &self.config))?;
        let mut ctx = RunContext {
            thesis,
            round: 1,
            state: DebateState::Running,
            history: DebateHistory::new(),
            last_probe: None,
            usage: Usage::default(),
            sink,
        };

        while !ctx.state.is_stopped() {
            self.play_round(&mut ctx).await?;
        }
        log::info!("debate stopped after round {}: {}", ctx.round, ctx.state);

        let rounds = ctx.history.exchanges();
        let messages = prompts::final_messages(ctx.thesis, &rounds);
        let rules = ValidationRules::judge(self.config.similarity_threshold);
        let final_turn = self.turn(Role::JudgeFinal, ctx.round, messages, rules).await?;
        let decision = final_turn
            .decision
            .clone()
            .unwrap_or_else(|| JudgeDecision::fallback(&final_turn.text));
        ctx.accept(final_turn)?;
        ctx.sink.record(&DebateEvent::run_stopped(ctx.round, ctx.state))?;

        Ok(DebateOutcome {
            thesis: thesis.to_string(),
            rounds: ctx.history.rounds(),
            log_path: ctx.sink.location().map(|p| p.to_path_buf()),
            history: ctx.history,
            decision,
            state: ctx.state,
            usage: ctx.usage,
        })
    }

    async fn play_round(&self, ctx: &mut RunContext<'_>) -> Result<(), DebateError> {
        log::info!("round {}/{}", ctx.round, self.config.max_rounds);

        let pro = self.agent_turn(Role::Pro, ctx).await?;
        let pro_text = pro.text.clone();
        let pro_stop = stop_phrase_hit(pro.full_text(), &self.config.stop_phrases);
        ctx.accept(pro)?;
        let contra = self.agent_turn(Role::Contra, ctx).await?;
        let contra_text = contra.text.clone();
        let contra_stop = stop_phrase_hit(contra.full_text(), &self.config.stop_phrases);
        ctx.accept(contra)?;

        if pro_stop || contra_stop {
            ctx.state = DebateState::StoppedByStopPhrase;
            return Ok(());
        }

        let messages = prompts::probe_messages(ctx.thesis, &pro_text, &contra_text);
        let rules = ValidationRules::judge(self.config.similarity_threshold);
        let probe = self.turn(Role::JudgeProbe, ctx.round, messages, rules).await?;
        let probability = probe
            .decision
            .as_ref()
            .filter(|_| !probe.outcome.is_fallback())
            .map(|decision| decision.probability);
        ctx.accept(probe)?;

        if let Some(current) = probability {
            if let Some(previous) = ctx.last_probe {
                let delta = (current - previous).abs();
                log::debug!(
                    "probe moved by {delta:.3} (threshold {})",
                    self.config.convergence_delta
                );
                if delta < self.config.convergence_delta {
                    ctx.state = DebateState::StoppedByConvergence;
                    return Ok(());
                }
            }
            ctx.last_probe = Some(current);
        }

        if ctx.round >= self.config.max_rounds {
            ctx.state = DebateState::StoppedByMaxRounds;
        } else {
            ctx.round += 1;
        }
        Ok(())
    }

    async fn agent_turn(
        &self,
        role: Role,
        ctx: &RunContext<'_>,
    ) -> Result<TurnOutput, DebateError> {
        let history = &ctx.history;
        let text_of = |r: Role| history.last_of(r).map(|turn| turn.text.as_str());
        let full_text_of = |r: Role| history.last_of(r).map(TurnOutput::full_text);
        let own_previous = full_text_of(role);
        let opponent_previous = role.opponent().and_then(full_text_of);

        let context = prompts::compact_history(text_of(Role::Pro), text_of(Role::Contra));
        let messages = prompts::agent_messages(role, ctx.thesis, &context);
        let template = role
            .template()
            .ok_or_else(|| DebateError::InvalidConfig(format!("{role} has no template")))?;
        let rules = ValidationRules::agent(
            template,
            opponent_previous,
            own_previous,
            self.config.similarity_threshold,
        );
        self.turn(role, ctx.round, messages, rules).await
    }

    async fn turn(
        &self,
        role: Role,
        round: u32,
        messages: Vec<ChatMessage>,
        rules: ValidationRules<'_>,
    ) -> Result<TurnOutput, DebateError> {
        let ctx = TurnContext {
            round,
            messages,
            settings: self.config.role(role),
            rules,
        };
        let output = TurnExecutor::new(&self.client, self.config.retry_bound)
            .execute_turn(role, &ctx)
            .await
            .map_err(|source| DebateError::Completion { role, round, source })?;
        if output.outcome.is_fallback() {
            log::warn!("round {round} {role} accepted as fallback");
        }
        Ok(output)
    }
}
