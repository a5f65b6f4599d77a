use std::time::Duration;

use async_trait::async_trait;
use futures::Stream;
use futures::stream;
use rdkafka::Message;
use rdkafka::consumer::{Consumer, StreamConsumer};

use crate::common::AnswerPoll;
use crate::config::FrontendConfig;
use crate::error::Result;

use super::codec::decode_answer;
use super::producer::client_config;

/// Something that can be asked for the next answer record.
#[async_trait(?Send)]
pub trait AnswerSource {
    /// One bounded attempt; `AnswerPoll::Empty` when nothing arrived.
    async fn poll(&mut self) -> Result<AnswerPoll>;
}

/// Lazy, never-ending sequence of poll results. Dropping the stream stops
/// polling; a fresh subscription needs a fresh source.
pub fn poll_indefinitely<S>(source: S) -> impl Stream<Item = Result<AnswerPoll>>
where
    S: AnswerSource,
{
    stream::unfold(source, |mut source| async move {
        let next = source.poll().await;
        Some((next, source))
    })
}

pub struct KafkaAnswerConsumer {
    consumer: StreamConsumer,
    poll_timeout: Duration,
}

impl KafkaAnswerConsumer {
    pub fn subscribe(config: &FrontendConfig) -> Result<Self> {
        let consumer: StreamConsumer = client_config(&config.broker)
            .set("group.id", &config.broker.group_id)
            .set("auto.offset.reset", &config.broker.auto_offset_reset)
            .set("enable.auto.commit", "true")
            .create()?;
        consumer.subscribe(&[config.topics.prompt_answer.as_str()])?;
        log::info!(
            "Subscribed to {} as group {}",
            config.topics.prompt_answer,
            config.broker.group_id
        );

        Ok(Self {
            consumer,
            poll_timeout: config.poll_timeout(),
        })
    }
}

#[async_trait(?Send)]
impl AnswerSource for KafkaAnswerConsumer {
    async fn poll(&mut self) -> Result<AnswerPoll> {
        match tokio::time::timeout(self.poll_timeout, self.consumer.recv()).await {
            Err(_) => {
                log::debug!("No answer within {:?}", self.poll_timeout);
                Ok(AnswerPoll::Empty)
            }
            Ok(Err(err)) => Err(err.into()),
            Ok(Ok(message)) => {
                log::debug!(
                    "Answer record at partition {} offset {}",
                    message.partition(),
                    message.offset()
                );
                decode_answer(message.payload())
            }
        }
    }
}
