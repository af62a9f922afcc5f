//! Configuration for the product ingest service.
//!
//! Settings come from environment variables, with a `.env` file loaded in
//! development builds. Broker addresses and the store URL are required;
//! topic, group and index names have deployment defaults.

use anyhow::{Context, Result};
use std::env;

#[derive(Debug, Clone)]
pub struct Settings {
    pub kafka: KafkaSettings,
    pub store: StoreSettings,
}

impl Settings {
    pub fn load() -> Result<Self> {
        if cfg!(debug_assertions) {
            dotenvy::dotenv().ok();
        }

        Ok(Settings {
            kafka: KafkaSettings::from_env()?,
            store: StoreSettings::from_env()?,
        })
    }
}

/// Kafka consumer settings.
#[derive(Debug, Clone)]
pub struct KafkaSettings {
    pub brokers: String,
    pub group_id: String,
    pub topic: String,
}

impl KafkaSettings {
    fn from_env() -> Result<Self> {
        Ok(Self {
            brokers: env::var("KAFKA_BROKERS").context("KAFKA_BROKERS must be set")?,
            group_id: env::var("KAFKA_GROUP_ID")
                .unwrap_or_else(|_| "product-ingest-service".to_string()),
            topic: env::var("KAFKA_PRODUCT_TOPIC")
                .unwrap_or_else(|_| "product-topic".to_string()),
        })
    }
}

/// Document store settings.
#[derive(Debug, Clone)]
pub struct StoreSettings {
    pub url: String,
    pub index: String,
}

impl StoreSettings {
    fn from_env() -> Result<Self> {
        Ok(Self {
            url: env::var("ELASTICSEARCH_URL").context("ELASTICSEARCH_URL must be set")?,
            index: env::var("PRODUCT_INDEX").unwrap_or_else(|_| "products_v1".to_string()),
        })
    }
}
