use anyhow::Context;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;
use tokio_postgres::{Client, NoTls, Statement};

use crate::api::{BookRecord, CartEntry};
use crate::shopping_store::{ShoppingStore, ShoppingStoreError};

const FAVORITES_KEY: &str = "favorites";
const CART_KEY: &str = "cart";

pub struct PostgresShoppingStore {
    client: Client,
}

pub struct PostgresShoppingStoreConfig {
    pub hostname: String,
    pub username: String,
    pub password: String,
}

impl PostgresShoppingStore {
    pub async fn init(config: PostgresShoppingStoreConfig) -> anyhow::Result<Self> {
        let connection_str = format!(
            "postgresql://{}:{}@{}",
            config.username, config.password, config.hostname
        );
        tracing::info!("Postgres connection_str: {}", connection_str);
        let (client, connection) = tokio_postgres::connect(&connection_str, NoTls)
            .await
            .context("Failed to start postgres")?;

        tokio::spawn(async move {
            if let Err(e) = connection.await {
                eprintln!("connection error: {}", e);
            }
        });

        // One row per named list, the whole list as a single JSONB value
        client
            .batch_execute(
                "
        CREATE TABLE IF NOT EXISTS shopping_lists (
            key             TEXT PRIMARY KEY,
            items           JSONB NOT NULL
            )
        ",
            )
            .await
            .context("Failed to setup shopping_lists table")?;
        Ok(Self { client })
    }

    async fn load_list<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>, ShoppingStoreError> {
        let stmt: Statement = self
            .client
            .prepare("SELECT items FROM shopping_lists WHERE key = ($1)")
            .await?;

        let rows = self.client.query(&stmt, &[&key]).await?;

        match rows.first() {
            Some(row) => {
                let items: serde_json::Value = row.try_get(0)?;
                Ok(serde_json::from_value(items)?)
            }
            None => Ok(vec![]),
        }
    }

    async fn store_list<T: Serialize>(
        &self,
        key: &str,
        items: Vec<T>,
    ) -> Result<(), ShoppingStoreError> {
        let stmt: Statement = self
            .client
            .prepare(
                "INSERT INTO shopping_lists (key, items) VALUES ($1, $2) \
                 ON CONFLICT (key) DO UPDATE SET items = ($2)",
            )
            .await?;

        self.client.execute(&stmt, &[&key, &json!(items)]).await?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl ShoppingStore for PostgresShoppingStore {
    async fn load_favorites(&self) -> Result<Vec<BookRecord>, ShoppingStoreError> {
        self.load_list(FAVORITES_KEY).await
    }

    async fn store_favorites(
        &self,
        favorites: Vec<BookRecord>,
    ) -> Result<(), ShoppingStoreError> {
        self.store_list(FAVORITES_KEY, favorites).await
    }

    async fn load_cart(&self) -> Result<Vec<CartEntry>, ShoppingStoreError> {
        self.load_list(CART_KEY).await
    }

    async fn store_cart(&self, entries: Vec<CartEntry>) -> Result<(), ShoppingStoreError> {
        self.store_list(CART_KEY, entries).await
    }
}
