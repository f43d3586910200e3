//! Structured Pro/Contra debate runner.
//!
//! Two language-model agents argue a thesis over several rounds while a
//! neutral judge model scores every round. The debate stops early when an
//! agent emits a stop phrase or when the judge's probability estimate
//! converges, and a final judge turn produces a machine-parseable verdict.
//!
//! The crate is organised leaf-first:
//!
//! * [`chat`] and [`backends`]: the completion client boundary and an
//!   OpenAI-compatible implementation.
//! * [`validation`]: template, anti-mirroring, anti-repeat and judge JSON
//!   checks.
//! * [`turn`]: the bounded retry loop that turns raw completions into
//!   accepted or fallback turn outputs.
//! * [`debate`]: the round state machine.
//! * [`event_log`]: the append-only JSONL record of a run.

pub mod backends;
pub mod builder;
pub mod chat;
pub mod debate;
pub mod error;
pub mod event_log;
pub mod prompts;
pub mod resilient_llm;
pub mod turn;
pub mod validation;

pub use debate::{Debate, DebateConfig, DebateOutcome, DebateState, RoleSettings};
pub use error::{DebateError, LLMError};
pub use turn::{Role, TurnOutcome, TurnOutput};
pub use validation::{JudgeDecision, RejectReason};
