pub mod config;
pub mod events;
pub mod models;
pub mod sanitize;
pub mod services;

pub use models::product::{Product, Violation};
pub use services::handler::ProductMessageHandler;
pub use services::store::{ElasticsearchProductStore, ProductStore};
