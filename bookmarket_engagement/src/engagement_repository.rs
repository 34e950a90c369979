pub use in_memory_engagement_repository::InMemoryEngagementRepository;
pub use postgres_engagement_repository::{
    PostgresEngagementRepository, PostgresEngagementRepositoryConfig,
};

use crate::api::{BookId, BookReport, BookReportDraft, ContactMessage, Review, ReviewDraft, ReviewId};

mod in_memory_engagement_repository;
mod postgres_engagement_repository;

pub(crate) fn unix_now() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|duration| duration.as_secs() as i64)
        .unwrap_or_default()
}

#[derive(Debug, thiserror::Error)]
pub enum EngagementRepositoryError {
    #[error("Failed to deserialize record: {0}")]
    DeserializationError(#[from] serde_json::Error),

    #[error("DatabaseFailure failure {0}")]
    DatabaseFailure(#[from] tokio_postgres::Error),

    #[error("Other error {0}")]
    Other(String),
}

#[async_trait::async_trait]
pub trait EngagementRepository: Send + Sync {
    /// Stores a review for the book, stamps it with the submission time,
    /// returns the id assigned to it
    async fn add_review(
        &self,
        book_id: BookId,
        draft: ReviewDraft,
    ) -> Result<ReviewId, EngagementRepositoryError>;

    /// Reviews for the book, newest first
    async fn list_reviews(&self, book_id: BookId) -> Result<Vec<Review>, EngagementRepositoryError>;

    /// Stores a report against the book, stamped with the submission time
    async fn add_report(
        &self,
        book_id: BookId,
        draft: BookReportDraft,
    ) -> Result<(), EngagementRepositoryError>;

    /// Reports filed against the book
    async fn list_reports(
        &self,
        book_id: BookId,
    ) -> Result<Vec<BookReport>, EngagementRepositoryError>;

    /// Stores a message sent through the contact form
    async fn add_contact_message(
        &self,
        message: ContactMessage,
    ) -> Result<(), EngagementRepositoryError>;

    /// Every contact message received so far
    async fn list_contact_messages(&self)
        -> Result<Vec<ContactMessage>, EngagementRepositoryError>;
}
