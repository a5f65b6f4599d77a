use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::error::{FrontendError, Result};

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// One operator submission, as published to the raw prompt topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptRaw {
    pub id: String,
    pub prompt: String,
    pub timestamp: String,
}

impl PromptRaw {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self::at(prompt, Utc::now())
    }

    pub fn at(prompt: impl Into<String>, submitted: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            prompt: prompt.into(),
            timestamp: submitted.format(TIMESTAMP_FORMAT).to_string(),
        }
    }
}

/// Outcome of a single poll against the answer topic.
#[derive(Debug, Clone, PartialEq)]
pub enum AnswerPoll {
    Empty,
    Message(Value),
}

impl AnswerPoll {
    /// `{}` counts as empty, same as no record at all.
    pub fn from_value(value: Value) -> Self {
        match &value {
            Value::Null => Self::Empty,
            Value::Object(map) if map.is_empty() => Self::Empty,
            _ => Self::Message(value),
        }
    }
}

/// Chat-completion shaped answer produced by the downstream pipeline.
#[derive(Debug, Clone, Deserialize)]
pub struct AnswerMessage {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    #[serde(default)]
    pub message: ChoiceMessage,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChoiceMessage {
    #[serde(default)]
    pub content: Option<String>,
}

impl AnswerMessage {
    pub fn from_value(value: Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    /// Content of the first choice; empty when the choice carries no text.
    pub fn content(&self) -> Result<&str> {
        let first = self
            .choices
            .first()
            .ok_or_else(|| FrontendError::MalformedAnswer("no choices in answer".to_string()))?;
        Ok(first.message.content.as_deref().unwrap_or(""))
    }
}
