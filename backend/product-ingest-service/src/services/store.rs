use async_trait::async_trait;
use elasticsearch::{
    http::transport::{BuildError, SingleNodeConnectionPool, TransportBuilder},
    http::StatusCode,
    indices::{IndicesCreateParts, IndicesExistsParts},
    Elasticsearch, ExistsParts, IndexParts,
};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;
use url::Url;

use crate::config::StoreSettings;
use crate::models::product::Product;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid Elasticsearch URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("failed to build transport: {0}")]
    TransportBuild(#[from] BuildError),
    #[error("transport error: {0}")]
    Transport(#[from] elasticsearch::Error),
    #[error("unexpected response status: {0}")]
    UnexpectedStatus(u16),
    #[error("store backend error: {0}")]
    Backend(String),
}

/// Persistence seam for product records: an existence probe and an
/// idempotent upsert keyed by product id.
#[async_trait]
pub trait ProductStore: Send + Sync {
    async fn exists(&self, id: &str) -> Result<bool, StoreError>;
    async fn save(&self, product: &Product) -> Result<(), StoreError>;
}

#[async_trait]
impl<S> ProductStore for Arc<S>
where
    S: ProductStore + ?Sized,
{
    async fn exists(&self, id: &str) -> Result<bool, StoreError> {
        (**self).exists(id).await
    }

    async fn save(&self, product: &Product) -> Result<(), StoreError> {
        (**self).save(product).await
    }
}

#[derive(Clone)]
pub struct ElasticsearchProductStore {
    client: Elasticsearch,
    index: String,
}

impl ElasticsearchProductStore {
    /// Connect to Elasticsearch and make sure the product index exists with
    /// the expected mapping.
    pub async fn connect(settings: &StoreSettings) -> Result<Self, StoreError> {
        let parsed = Url::parse(&settings.url)?;
        let pool = SingleNodeConnectionPool::new(parsed);
        let transport = TransportBuilder::new(pool).build()?;
        let client = Elasticsearch::new(transport);

        let store = Self {
            client,
            index: settings.index.clone(),
        };
        store.ensure_index().await?;

        Ok(store)
    }

    async fn ensure_index(&self) -> Result<(), StoreError> {
        let exists_response = self
            .client
            .indices()
            .exists(IndicesExistsParts::Index(&[self.index.as_str()]))
            .send()
            .await?;

        if exists_response.status_code().is_success() {
            return Ok(());
        }

        let body = json!({
            "mappings": {
                "properties": {
                    "id": { "type": "keyword" },
                    "name": { "type": "text" },
                    "brand": { "type": "keyword" },
                    "category": { "type": "keyword" },
                    "price": { "type": "double" },
                    "isAvailable": { "type": "boolean" },
                    "quantity": { "type": "long" },
                    "tags": { "type": "keyword" }
                }
            }
        });

        self.client
            .indices()
            .create(IndicesCreateParts::Index(&self.index))
            .body(body)
            .send()
            .await?;

        info!("created product index: {}", self.index);
        Ok(())
    }
}

#[async_trait]
impl ProductStore for ElasticsearchProductStore {
    async fn exists(&self, id: &str) -> Result<bool, StoreError> {
        let response = self
            .client
            .exists(ExistsParts::IndexId(&self.index, id))
            .send()
            .await?;

        let status = response.status_code();
        if status.is_success() {
            Ok(true)
        } else if status == StatusCode::NOT_FOUND {
            Ok(false)
        } else {
            Err(StoreError::UnexpectedStatus(status.as_u16()))
        }
    }

    async fn save(&self, product: &Product) -> Result<(), StoreError> {
        let response = self
            .client
            .index(IndexParts::IndexId(&self.index, product.id.as_str()))
            .body(product)
            .send()
            .await?;

        let status = response.status_code();
        if !status.is_success() {
            return Err(StoreError::UnexpectedStatus(status.as_u16()));
        }
        Ok(())
    }
}
