use std::collections::HashMap;
use std::sync::atomic::{AtomicI32, Ordering};

use crate::api::{
    BookId, BookReport, BookReportDraft, ContactMessage, Review, ReviewDraft, ReviewId,
};
use crate::engagement_repository::{unix_now, EngagementRepository, EngagementRepositoryError};

pub struct InMemoryEngagementRepository {
    review_sequence_generator: AtomicI32,
    reviews: parking_lot::RwLock<HashMap<BookId, Vec<Review>>>,
    reports: parking_lot::RwLock<HashMap<BookId, Vec<BookReport>>>,
    contact_messages: parking_lot::RwLock<Vec<ContactMessage>>,
}

impl Default for InMemoryEngagementRepository {
    fn default() -> Self {
        Self {
            review_sequence_generator: Default::default(),
            reviews: Default::default(),
            reports: Default::default(),
            contact_messages: Default::default(),
        }
    }
}

#[async_trait::async_trait]
impl EngagementRepository for InMemoryEngagementRepository {
    async fn add_review(
        &self,
        book_id: BookId,
        draft: ReviewDraft,
    ) -> Result<ReviewId, EngagementRepositoryError> {
        let id = self
            .review_sequence_generator
            .fetch_add(1, Ordering::Relaxed);
        let review = Review::from_draft(id, draft, unix_now());
        self.reviews.write().entry(book_id).or_default().push(review);
        Ok(id)
    }

    async fn list_reviews(
        &self,
        book_id: BookId,
    ) -> Result<Vec<Review>, EngagementRepositoryError> {
        Ok(self
            .reviews
            .read()
            .get(&book_id)
            .map(|reviews| reviews.iter().rev().cloned().collect())
            .unwrap_or_default())
    }

    async fn add_report(
        &self,
        book_id: BookId,
        draft: BookReportDraft,
    ) -> Result<(), EngagementRepositoryError> {
        self.reports
            .write()
            .entry(book_id)
            .or_default()
            .push(BookReport {
                book_id,
                reason: draft.reason,
                details: draft.details,
                submitted_at: unix_now(),
            });
        Ok(())
    }

    async fn list_reports(
        &self,
        book_id: BookId,
    ) -> Result<Vec<BookReport>, EngagementRepositoryError> {
        Ok(self
            .reports
            .read()
            .get(&book_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn add_contact_message(
        &self,
        message: ContactMessage,
    ) -> Result<(), EngagementRepositoryError> {
        self.contact_messages.write().push(message);
        Ok(())
    }

    async fn list_contact_messages(
        &self,
    ) -> Result<Vec<ContactMessage>, EngagementRepositoryError> {
        Ok(self.contact_messages.read().clone())
    }
}
