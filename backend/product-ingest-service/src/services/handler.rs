use thiserror::Error;
use tracing::{error, info, warn};

use crate::models::product::{Product, Violation};
use crate::sanitize::sanitize_name;
use crate::services::store::{ProductStore, StoreError};

/// Why a message was dropped.
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("failed to parse product payload: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("product failed validation on {} field(s)", .0.len())]
    Validation(Vec<Violation>),
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

/// Whether the upsert created a new document or replaced an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Created,
    Updated,
}

/// Runs the per-message pipeline: parse, sanitize, validate, save.
///
/// Generic over the store so tests can substitute an in-memory double.
pub struct ProductMessageHandler<S> {
    store: S,
}

impl<S: ProductStore> ProductMessageHandler<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Process one raw message. Never fails: any pipeline error is logged
    /// and the message dropped, so one bad message cannot stall the
    /// consumer.
    pub async fn handle(&self, payload: &[u8]) {
        if let Err(err) = self.process(payload).await {
            match err {
                HandlerError::Parse(e) => {
                    warn!("dropping malformed product payload: {}", e);
                }
                HandlerError::Validation(violations) => {
                    for violation in &violations {
                        warn!("{}", violation);
                    }
                    warn!(
                        "dropping product payload after {} validation failure(s)",
                        violations.len()
                    );
                }
                HandlerError::Store(e) => {
                    error!("store error while persisting product: {}", e);
                }
            }
        }
    }

    /// The fallible pipeline behind [`handle`](Self::handle), exposed so
    /// tests can assert on the disposition of a message.
    pub async fn process(&self, payload: &[u8]) -> Result<SaveOutcome, HandlerError> {
        let mut product: Product = serde_json::from_slice(payload)?;

        product.name = sanitize_name(&product.name);

        let violations = product.violations();
        if !violations.is_empty() {
            return Err(HandlerError::Validation(violations));
        }

        let existed = self.store.exists(&product.id).await?;
        self.store.save(&product).await?;

        if existed {
            info!("product {} updated successfully", product.id);
            Ok(SaveOutcome::Updated)
        } else {
            info!("new product saved with id: {}", product.id);
            Ok(SaveOutcome::Created)
        }
    }
}
