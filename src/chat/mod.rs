mod message;
mod request;
mod traits;
mod usage;

pub use message::{ChatMessage, ChatMessageBuilder, ChatRole};
pub use request::ChatRequest;
pub use traits::{ChatProvider, ChatResponse};
pub use usage::Usage;
