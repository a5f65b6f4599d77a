use rdkafka::error::KafkaError;
use schema_registry_converter::error::SRCError;
use thiserror::Error;

use crate::config::ConfigError;

pub type Result<T> = std::result::Result<T, FrontendError>;

#[derive(Debug, Error)]
pub enum FrontendError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("broker error: {0}")]
    Broker(#[from] KafkaError),

    #[error("delivery of record {0} was canceled by the producer")]
    DeliveryCanceled(String),

    #[error("schema registry error: {0}")]
    Schema(#[from] SRCError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("standard input closed before a prompt was entered")]
    EndOfInput,

    #[error("json error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("malformed answer: {0}")]
    MalformedAnswer(String),
}
