#[path = "builder/llm_builder.rs"]
mod llm_builder;

#[path = "builder/state.rs"]
mod state;

#[path = "builder/resilience.rs"]
mod resilience;

#[path = "builder/build/core.rs"]
mod build;

pub use llm_builder::LLMBuilder;
