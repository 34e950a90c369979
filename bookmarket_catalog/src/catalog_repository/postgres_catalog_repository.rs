use anyhow::Context;
use serde_json::json;
use tokio_postgres::{Client, NoTls, Statement};

use crate::api::{BookDetails, BookDetailsPatch, BookId, BookTitleAndId};
use crate::catalog_repository::CatalogRepositoryError::Other;
use crate::catalog_repository::{CatalogRepository, CatalogRepositoryError};

pub struct PostgresCatalogRepository {
    client: Client,
}

pub struct PostgresCatalogRepositoryConfig {
    pub hostname: String,
    pub username: String,
    pub password: String,
}

impl PostgresCatalogRepository {
    pub async fn init(config: PostgresCatalogRepositoryConfig) -> anyhow::Result<Self> {
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

        client
            .batch_execute(
                "
        CREATE TABLE IF NOT EXISTS listings (
            id              SERIAL PRIMARY KEY,
            params          JSONB
            )
        ",
            )
            .await
            .context("Failed to setup listings table")?;
        Ok(Self { client })
    }
}

#[async_trait::async_trait]
impl CatalogRepository for PostgresCatalogRepository {
    async fn add_book(&self, details: BookDetails) -> Result<BookId, CatalogRepositoryError> {
        let stmt: Statement = self
            .client
            .prepare("INSERT INTO listings (params) VALUES ($1) RETURNING id")
            .await?;

        let rows = self.client.query(&stmt, &[&json!(details)]).await?;

        let book_id: BookId = rows
            .first()
            .ok_or_else(|| CatalogRepositoryError::Other("Id not returned".to_string()))?
            .try_get(0)?;

        Ok(book_id)
    }

    async fn update_book(
        &self,
        book_id: BookId,
        patch: BookDetailsPatch,
    ) -> Result<bool, CatalogRepositoryError> {
        let stmt: Statement = self
            .client
            .prepare(
                "UPDATE listings SET params = params || ($1)::JSONB WHERE id = ($2) RETURNING id",
            )
            .await?;

        let rows = self.client.query(&stmt, &[&json!(patch), &book_id]).await?;
        Ok(!rows.is_empty())
    }

    async fn get_book(&self, book_id: BookId) -> Result<BookDetails, CatalogRepositoryError> {
        let stmt: Statement = self
            .client
            .prepare("SELECT params FROM listings WHERE id = ($1)")
            .await?;

        let rows = self.client.query(&stmt, &[&book_id]).await?;

        let details: serde_json::Value = rows
            .first()
            .ok_or_else(|| CatalogRepositoryError::NotFound(book_id))?
            .try_get(0)?;

        Ok(serde_json::from_value(details)?)
    }

    async fn list_books(&self) -> Result<Vec<BookTitleAndId>, CatalogRepositoryError> {
        let stmt: Statement = self
            .client
            .prepare("SELECT id, params->'title' FROM listings")
            .await?;

        let rows = self.client.query(&stmt, &[]).await?;

        rows.iter()
            .map(|row| {
                let book_id = row.try_get(0)?;
                let title_json: serde_json::Value = row.try_get(1)?;

                Ok(BookTitleAndId {
                    book_id,
                    title: title_json
                        .as_str()
                        .ok_or_else(|| Other("Title is not string".to_string()))?
                        .to_string(),
                })
            })
            .collect()
    }
}
