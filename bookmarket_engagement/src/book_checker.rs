use anyhow::Context;
use reqwest_middleware::ClientBuilder;
use reqwest_tracing::TracingMiddleware;

use crate::api::BookId;

/// Asks the catalog service whether a book id refers to a real listing.
/// Reviews and reports are only accepted for books that exist there.
pub struct BookPresenceChecker {
    catalog_url: String,
}

impl BookPresenceChecker {
    pub fn new(catalog_url: String) -> Self {
        Self { catalog_url }
    }

    pub async fn check_book_exists(&self, book_id: BookId) -> anyhow::Result<bool> {
        let reqwest_client = reqwest::Client::builder()
            .build()
            .context("Failed to build reqwest client")?;
        let client = ClientBuilder::new(reqwest_client)
            // Insert the tracing middleware
            .with(TracingMiddleware::default())
            .build();

        let response = client
            .get(&format!("{}/api/book/{}", self.catalog_url, book_id))
            .send()
            .await
            .context("Failed to get book by id")?;

        Ok(response.status().is_success())
    }
}
