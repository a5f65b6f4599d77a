pub mod schemas;
pub mod types;

pub use schemas::PROMPT_RAW_SCHEMA;
pub use types::{AnswerMessage, AnswerPoll, PromptRaw};
