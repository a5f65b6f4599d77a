pub mod codec;
pub mod consumer;
pub mod producer;

pub use consumer::{AnswerSource, KafkaAnswerConsumer, poll_indefinitely};
pub use producer::{PromptSink, SchemaProducer};
