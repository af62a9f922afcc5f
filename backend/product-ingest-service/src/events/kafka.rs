use std::time::Duration;

use rdkafka::config::ClientConfig;
use rdkafka::consumer::{CommitMode, Consumer, StreamConsumer};
use rdkafka::error::KafkaError;
use rdkafka::message::Message;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::config::KafkaSettings;
use crate::services::handler::ProductMessageHandler;
use crate::services::store::ProductStore;

/// Spawn a Tokio task running the product consumer loop.
pub fn spawn_product_consumer<S>(
    handler: ProductMessageHandler<S>,
    settings: KafkaSettings,
) -> JoinHandle<()>
where
    S: ProductStore + 'static,
{
    tokio::spawn(async move {
        if let Err(err) = run_consumer(handler, settings).await {
            error!("Kafka consumer terminated with error: {}", err);
        }
    })
}

async fn run_consumer<S: ProductStore>(
    handler: ProductMessageHandler<S>,
    settings: KafkaSettings,
) -> Result<(), KafkaError> {
    info!(
        "Starting Kafka consumer for product ingestion (topic: {}, group: {})",
        settings.topic, settings.group_id
    );

    let consumer: StreamConsumer = ClientConfig::new()
        .set("bootstrap.servers", &settings.brokers)
        .set("group.id", &settings.group_id)
        .set("enable.auto.commit", "true")
        .set("enable.partition.eof", "false")
        .set("session.timeout.ms", "45000")
        .set("max.poll.interval.ms", "300000")
        .create()?;

    consumer.subscribe(&[settings.topic.as_str()])?;

    loop {
        match consumer.recv().await {
            Ok(record) => {
                info!(
                    "Reading message from topic: {}, partition: {}, offset: {}",
                    record.topic(),
                    record.partition(),
                    record.offset()
                );

                match record.payload() {
                    Some(payload) => handler.handle(payload).await,
                    None => {
                        debug!(
                            "Received Kafka message with empty payload (topic: {})",
                            record.topic()
                        );
                    }
                }

                // The handler logs and swallows processing failures, so the
                // commit runs for every delivered message.
                if let Err(commit_err) = consumer.commit_message(&record, CommitMode::Async) {
                    warn!(
                        "Failed to commit offset for topic: {}, partition: {}, offset: {}: {}",
                        record.topic(),
                        record.partition(),
                        record.offset(),
                        commit_err
                    );
                }
            }
            Err(err) => {
                error!("Kafka error: {}", err);
                tokio::time::sleep(Duration::from_secs(1)).await;
            }
        }
    }
}
