//! Language-model completion clients

mod error;
mod mock;
mod ollama;
mod traits;

pub use error::{LlmError, LlmResult};
pub use mock::MockLlm;
pub use ollama::OllamaClient;
pub use traits::LlmClient;
