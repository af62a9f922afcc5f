use anyhow::{Context, Result};
use product_ingest_service::config::Settings;
use product_ingest_service::events::kafka::spawn_product_consumer;
use product_ingest_service::services::handler::ProductMessageHandler;
use product_ingest_service::services::store::ElasticsearchProductStore;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,product_ingest_service=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting product-ingest-service");

    let settings = Settings::load().context("Failed to load configuration")?;

    let store = ElasticsearchProductStore::connect(&settings.store)
        .await
        .context("Failed to connect to the product store")?;
    tracing::info!("Product store ready (index: {})", settings.store.index);

    let handler = ProductMessageHandler::new(store);
    let consumer = spawn_product_consumer(handler, settings.kafka);

    tokio::select! {
        _ = consumer => {
            tracing::error!("Product consumer task exited unexpectedly");
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Received shutdown signal, stopping product-ingest-service");
        }
    }

    Ok(())
}
