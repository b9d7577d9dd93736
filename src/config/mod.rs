mod loader;
mod types;

pub use loader::ConfigError;
pub use types::{ApiConfig, Config, PollingConfig, SessionConfig, DEFAULT_API_URL};
