mod env;
mod error;
mod load;
mod types;
mod validate;

pub use load::{load_config, LoadedConfig};
pub use types::{AppConfig, LoggingConfig};
pub use validate::validate;
