use anyhow::{bail, Context};
use reqwest::header::LOCATION;
use reqwest::StatusCode;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_tracing::TracingMiddleware;

use crate::api::{
    BookId, BookReport, BookReportDraft, ContactMessage, GetContactMessagesResponse,
    GetReportsResponse, ReviewDraft, ReviewId, ReviewsResponse,
};

pub struct EngagementClient {
    url: String,
    client: ClientWithMiddleware,
}

impl EngagementClient {
    pub fn new(url: &str) -> anyhow::Result<Self> {
        let reqwest_client = reqwest::Client::builder()
            .build()
            .context("Failed to build reqwest client")?;
        let client = ClientBuilder::new(reqwest_client)
            // Insert the tracing middleware
            .with(TracingMiddleware::default())
            .build();

        Ok(Self {
            url: url.to_string(),
            client,
        })
    }

    /// Calls POST /api/book/{book_id}/review endpoint
    /// Returns the id of the stored review,
    /// None if the book does not exist in the catalog
    pub async fn add_review(
        &self,
        book_id: BookId,
        draft: ReviewDraft,
    ) -> anyhow::Result<Option<ReviewId>> {
        let response = self
            .client
            .post(format!("{}/api/book/{}/review", self.url, book_id))
            .json(&draft)
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            let error: String = response.json().await.unwrap_or_default();
            bail!("Failed to add review {}", error)
        }

        let location_header = response
            .headers()
            .get(LOCATION)
            .context("No location header")?;

        let review_id = location_header
            .to_str()
            .context("Failed to convert header to str")?
            .strip_prefix(&format!("/api/book/{}/review/", book_id))
            .context("Invalid location header")?
            .parse()
            .context("Failed to parse review id")?;
        Ok(Some(review_id))
    }

    /// Calls GET /api/book/{book_id}/reviews endpoint
    pub async fn get_reviews(&self, book_id: BookId) -> anyhow::Result<ReviewsResponse> {
        let response = self
            .client
            .get(format!("{}/api/book/{}/reviews", self.url, book_id))
            .send()
            .await?;
        if response.status().is_success() {
            Ok(response.json().await?)
        } else {
            let error: String = response.json().await.unwrap_or_default();
            bail!("Failed to get reviews {}", error)
        }
    }

    /// Calls POST /api/book/{book_id}/report endpoint
    /// Returns true if the report was filed,
    /// false if the book does not exist in the catalog
    pub async fn report_book(
        &self,
        book_id: BookId,
        draft: BookReportDraft,
    ) -> anyhow::Result<bool> {
        let response = self
            .client
            .post(format!("{}/api/book/{}/report", self.url, book_id))
            .json(&draft)
            .send()
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            Ok(false)
        } else if response.status().is_success() {
            Ok(true)
        } else {
            let error: String = response.json().await.unwrap_or_default();
            bail!("Failed to report book {}", error)
        }
    }

    /// Calls GET /api/book/{book_id}/reports endpoint
    pub async fn get_reports(&self, book_id: BookId) -> anyhow::Result<Vec<BookReport>> {
        let response = self
            .client
            .get(format!("{}/api/book/{}/reports", self.url, book_id))
            .send()
            .await?;
        if response.status().is_success() {
            let body: GetReportsResponse = response.json().await?;
            Ok(body.reports)
        } else {
            let error: String = response.json().await.unwrap_or_default();
            bail!("Failed to get reports {}", error)
        }
    }

    /// Calls POST /api/contact endpoint
    pub async fn send_contact_message(&self, message: ContactMessage) -> anyhow::Result<()> {
        let response = self
            .client
            .post(format!("{}/api/contact", self.url))
            .json(&message)
            .send()
            .await?;
        if response.status().is_success() {
            Ok(())
        } else {
            let error: String = response.json().await.unwrap_or_default();
            bail!("Failed to send contact message {}", error)
        }
    }

    /// Calls GET /api/contact endpoint
    pub async fn get_contact_messages(&self) -> anyhow::Result<Vec<ContactMessage>> {
        let response = self
            .client
            .get(format!("{}/api/contact", self.url))
            .send()
            .await?;
        if response.status().is_success() {
            let body: GetContactMessagesResponse = response.json().await?;
            Ok(body.messages)
        } else {
            let error: String = response.json().await.unwrap_or_default();
            bail!("Failed to get contact messages {}", error)
        }
    }
}
