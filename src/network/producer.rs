use std::time::Duration;

use async_trait::async_trait;
use rdkafka::ClientConfig;
use rdkafka::producer::{DeliveryFuture, FutureProducer, FutureRecord, Producer};
use schema_registry_converter::async_impl::json::JsonEncoder;
use schema_registry_converter::async_impl::schema_registry::SrSettings;
use schema_registry_converter::schema_registry_common::{
    SchemaType, SubjectNameStrategy, SuppliedSchema,
};

use crate::common::PromptRaw;
use crate::config::{BrokerSettings, FrontendConfig, RegistrySettings};
use crate::error::{FrontendError, Result};

/// Validate-and-serialize plus publish, as one capability.
///
/// `send` may only enqueue; callers that need the record acknowledged must
/// follow it with `flush`.
#[async_trait(?Send)]
pub trait PromptSink {
    async fn send(&mut self, record: &PromptRaw) -> Result<()>;
    async fn flush(&mut self) -> Result<()>;
}

pub(crate) fn client_config(broker: &BrokerSettings) -> ClientConfig {
    let mut config = ClientConfig::new();
    config.set("bootstrap.servers", &broker.bootstrap);
    if !broker.api_key.is_empty() {
        config
            .set("security.protocol", "SASL_SSL")
            .set("sasl.mechanisms", "PLAIN")
            .set("sasl.username", &broker.api_key)
            .set("sasl.password", &broker.api_secret);
    }
    config
}

fn registry_settings(registry: &RegistrySettings) -> Result<SrSettings> {
    let mut builder = SrSettings::new_builder(registry.url.clone());
    if !registry.user.is_empty() {
        builder.set_basic_authorization(&registry.user, Some(registry.password.as_str()));
    }
    Ok(builder.build()?)
}

/// Kafka producer that encodes `PromptRaw` with the registry's JSON encoder.
pub struct SchemaProducer {
    producer: FutureProducer,
    encoder: JsonEncoder<'static>,
    topic: String,
    schema: String,
    flush_timeout: Duration,
    pending: Vec<(String, DeliveryFuture)>,
}

impl SchemaProducer {
    pub fn new(config: &FrontendConfig, schema: &str) -> Result<Self> {
        let producer: FutureProducer = client_config(&config.broker)
            .set("message.timeout.ms", "30000")
            .create()?;
        let encoder = JsonEncoder::new(registry_settings(&config.registry)?);
        log::info!(
            "Producer ready for topic {} via {}",
            config.topics.raw_prompt,
            config.broker.bootstrap
        );

        Ok(Self {
            producer,
            encoder,
            topic: config.topics.raw_prompt.clone(),
            schema: schema.to_string(),
            flush_timeout: config.flush_timeout(),
            pending: Vec::new(),
        })
    }

    fn subject_strategy(&self) -> SubjectNameStrategy {
        SubjectNameStrategy::TopicNameStrategyWithSchema(
            self.topic.clone(),
            false,
            SuppliedSchema {
                name: Some("PromptRaw".to_string()),
                schema_type: SchemaType::Json,
                schema: self.schema.clone(),
                references: vec![],
                properties: None,
                tags: None,
            },
        )
    }
}

#[async_trait(?Send)]
impl PromptSink for SchemaProducer {
    async fn send(&mut self, record: &PromptRaw) -> Result<()> {
        let value = serde_json::to_value(record)?;
        let payload = self.encoder.encode(&value, self.subject_strategy()).await?;
        log::debug!("Encoded prompt {} into {} bytes", record.id, payload.len());

        let delivery = self
            .producer
            .send_result(
                FutureRecord::to(&self.topic)
                    .key(&record.id)
                    .payload(&payload),
            )
            .map_err(|(err, _)| err)?;
        self.pending.push((record.id.clone(), delivery));
        Ok(())
    }

    async fn flush(&mut self) -> Result<()> {
        let producer = self.producer.clone();
        let timeout = self.flush_timeout;
        tokio::task::spawn_blocking(move || producer.flush(timeout))
            .await
            .map_err(std::io::Error::other)??;

        for (id, delivery) in self.pending.drain(..) {
            match delivery.await {
                Ok(Ok((partition, offset))) => {
                    log::info!("Prompt {id} delivered to partition {partition} at offset {offset}");
                }
                Ok(Err((err, _))) => return Err(err.into()),
                Err(_) => return Err(FrontendError::DeliveryCanceled(id)),
            }
        }
        Ok(())
    }
}
