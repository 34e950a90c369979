pub use in_memory_shopping_store::InMemoryShoppingStore;
pub use postgres_shopping_store::{PostgresShoppingStore, PostgresShoppingStoreConfig};

use crate::api::{BookRecord, CartEntry};

mod in_memory_shopping_store;
mod postgres_shopping_store;

#[derive(Debug, thiserror::Error)]
pub enum ShoppingStoreError {
    #[error("Failed to deserialize stored list: {0}")]
    DeserializationError(#[from] serde_json::Error),

    #[error("DatabaseFailure failure {0}")]
    DatabaseFailure(#[from] tokio_postgres::Error),

    #[error("Other error {0}")]
    Other(String),
}

/// Holds the two shopper lists, favorites and cart.
/// Every accessor reads or replaces a list as a whole; there is no
/// per-entry primitive, mutations are read-modify-write cycles.
#[async_trait::async_trait]
pub trait ShoppingStore: Send + Sync {
    async fn load_favorites(&self) -> Result<Vec<BookRecord>, ShoppingStoreError>;

    async fn store_favorites(&self, favorites: Vec<BookRecord>)
        -> Result<(), ShoppingStoreError>;

    async fn load_cart(&self) -> Result<Vec<CartEntry>, ShoppingStoreError>;

    async fn store_cart(&self, entries: Vec<CartEntry>) -> Result<(), ShoppingStoreError>;
}
