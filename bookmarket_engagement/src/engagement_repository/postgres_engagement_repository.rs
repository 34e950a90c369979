use anyhow::Context;
use serde_json::json;
use tokio_postgres::{Client, NoTls, Statement};

use crate::api::{
    BookId, BookReport, BookReportDraft, ContactMessage, Review, ReviewDraft, ReviewId,
};
use crate::engagement_repository::{unix_now, EngagementRepository, EngagementRepositoryError};

pub struct PostgresEngagementRepository {
    client: Client,
}

pub struct PostgresEngagementRepositoryConfig {
    pub hostname: String,
    pub username: String,
    pub password: String,
}

impl PostgresEngagementRepository {
    pub async fn init(config: PostgresEngagementRepositoryConfig) -> anyhow::Result<Self> {
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
        CREATE TABLE IF NOT EXISTS reviews (
            id              SERIAL PRIMARY KEY,
            book_id         INTEGER NOT NULL,
            posted_at       BIGINT,
            params          JSONB
            )
        ",
            )
            .await
            .context("Failed to setup reviews table")?;

        client
            .batch_execute(
                "
        CREATE TABLE IF NOT EXISTS reports (
            book_id         INTEGER NOT NULL,
            submitted_at    BIGINT,
            params          JSONB
            )
        ",
            )
            .await
            .context("Failed to setup reports table")?;

        client
            .batch_execute(
                "
        CREATE TABLE IF NOT EXISTS contact_messages (
            id              SERIAL PRIMARY KEY,
            params          JSONB
            )
        ",
            )
            .await
            .context("Failed to setup contact_messages table")?;

        Ok(Self { client })
    }
}

#[async_trait::async_trait]
impl EngagementRepository for PostgresEngagementRepository {
    async fn add_review(
        &self,
        book_id: BookId,
        draft: ReviewDraft,
    ) -> Result<ReviewId, EngagementRepositoryError> {
        let stmt: Statement = self
            .client
            .prepare(
                "INSERT INTO reviews (book_id, posted_at, params) VALUES ($1, $2, $3) \
                 RETURNING id",
            )
            .await?;

        let rows = self
            .client
            .query(&stmt, &[&book_id, &unix_now(), &json!(draft)])
            .await?;

        let review_id: ReviewId = rows
            .first()
            .ok_or_else(|| EngagementRepositoryError::Other("Id not returned".to_string()))?
            .try_get(0)?;

        Ok(review_id)
    }

    async fn list_reviews(
        &self,
        book_id: BookId,
    ) -> Result<Vec<Review>, EngagementRepositoryError> {
        let stmt: Statement = self
            .client
            .prepare(
                "SELECT id, posted_at, params FROM reviews WHERE book_id = ($1) \
                 ORDER BY id DESC",
            )
            .await?;

        let rows = self.client.query(&stmt, &[&book_id]).await?;

        rows.iter()
            .map(|row| {
                let review_id: ReviewId = row.try_get(0)?;
                let posted_at: i64 = row.try_get(1)?;
                let params: serde_json::Value = row.try_get(2)?;
                let draft: ReviewDraft = serde_json::from_value(params)?;
                Ok(Review::from_draft(review_id, draft, posted_at))
            })
            .collect()
    }

    async fn add_report(
        &self,
        book_id: BookId,
        draft: BookReportDraft,
    ) -> Result<(), EngagementRepositoryError> {
        let stmt: Statement = self
            .client
            .prepare("INSERT INTO reports (book_id, submitted_at, params) VALUES ($1, $2, $3)")
            .await?;

        self.client
            .execute(&stmt, &[&book_id, &unix_now(), &json!(draft)])
            .await?;
        Ok(())
    }

    async fn list_reports(
        &self,
        book_id: BookId,
    ) -> Result<Vec<BookReport>, EngagementRepositoryError> {
        let stmt: Statement = self
            .client
            .prepare("SELECT submitted_at, params FROM reports WHERE book_id = ($1)")
            .await?;

        let rows = self.client.query(&stmt, &[&book_id]).await?;

        rows.iter()
            .map(|row| {
                let submitted_at: i64 = row.try_get(0)?;
                let params: serde_json::Value = row.try_get(1)?;
                let draft: BookReportDraft = serde_json::from_value(params)?;
                Ok(BookReport {
                    book_id,
                    reason: draft.reason,
                    details: draft.details,
                    submitted_at,
                })
            })
            .collect()
    }

    async fn add_contact_message(
        &self,
        message: ContactMessage,
    ) -> Result<(), EngagementRepositoryError> {
        let stmt: Statement = self
            .client
            .prepare("INSERT INTO contact_messages (params) VALUES ($1)")
            .await?;

        self.client.execute(&stmt, &[&json!(message)]).await?;
        Ok(())
    }

    async fn list_contact_messages(
        &self,
    ) -> Result<Vec<ContactMessage>, EngagementRepositoryError> {
        let stmt: Statement = self
            .client
            .prepare("SELECT params FROM contact_messages ORDER BY id")
            .await?;

        let rows = self.client.query(&stmt, &[]).await?;

        rows.iter()
            .map(|row| {
                let params: serde_json::Value = row.try_get(0)?;
                Ok(serde_json::from_value(params)?)
            })
            .collect()
    }
}
