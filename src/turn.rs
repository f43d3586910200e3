//! One role's turn: call, validate, correct, retry, fall back.

#[path = "turn/role.rs"]
mod role;

#[path = "turn/output.rs"]
mod output;

#[path = "turn/executor.rs"]
mod executor;

pub use executor::{TurnContext, TurnExecutor, DEFAULT_RETRY_BOUND};
pub use output::{RejectedAttempt, TurnOutcome, TurnOutput};
pub use role::Role;
