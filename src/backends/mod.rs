//! Completion client implementations.

pub mod openai_compatible;

pub use openai_compatible::{OpenAICompatible, OpenAICompatibleConfig};
