use paperclip::actix::Apiv2Schema;
use serde::{Deserialize, Serialize};

pub type BookId = i32;
pub type ReviewId = i32;

#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq, Apiv2Schema)]
pub struct ReviewDraft {
    pub reviewer: String,
    /// Star rating, 1 to 5
    pub rating: u8,
    pub review: String,
    #[serde(default)]
    pub pros: String,
    #[serde(default)]
    pub cons: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq, Apiv2Schema)]
pub struct Review {
    pub review_id: ReviewId,
    pub reviewer: String,
    pub rating: u8,
    pub review: String,
    pub pros: String,
    pub cons: String,
    /// Unix timestamp in seconds
    pub posted_at: i64,
}

impl Review {
    pub fn from_draft(review_id: ReviewId, draft: ReviewDraft, posted_at: i64) -> Self {
        Self {
            review_id,
            reviewer: draft.reviewer,
            rating: draft.rating,
            review: draft.review,
            pros: draft.pros,
            cons: draft.cons,
            posted_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Apiv2Schema)]
pub struct RatingCount {
    pub stars: u8,
    pub count: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Apiv2Schema)]
pub struct ReviewSummary {
    pub review_count: u32,
    /// Average rating rounded to one decimal, 0 when there are no reviews
    pub average_rating: f64,
    /// Counts per star value, 5 stars first
    pub rating_counts: Vec<RatingCount>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Apiv2Schema)]
pub struct ReviewsResponse {
    pub summary: ReviewSummary,
    /// Newest first
    pub reviews: Vec<Review>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Eq, PartialEq, Apiv2Schema)]
#[serde(rename_all = "snake_case")]
pub enum ReportReason {
    Inappropriate,
    Copyright,
    Spam,
    Quality,
    Fake,
    Damaged,
    WrongBook,
    PriceIssue,
    SellerIssue,
    DescriptionMismatch,
    OutOfStock,
    Other,
}

impl ReportReason {
    pub fn label(&self) -> &'static str {
        match self {
            ReportReason::Inappropriate => "Inappropriate Content",
            ReportReason::Copyright => "Copyright Violation",
            ReportReason::Spam => "Spam or Misleading",
            ReportReason::Quality => "Poor Quality",
            ReportReason::Fake => "Fake or Counterfeit Book",
            ReportReason::Damaged => "Damaged or Defective",
            ReportReason::WrongBook => "Wrong Book Listed",
            ReportReason::PriceIssue => "Price Issue",
            ReportReason::SellerIssue => "Seller Issue",
            ReportReason::DescriptionMismatch => "Description Mismatch",
            ReportReason::OutOfStock => "Out of Stock",
            ReportReason::Other => "Other",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq, Apiv2Schema)]
pub struct BookReportDraft {
    pub reason: ReportReason,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq, Apiv2Schema)]
pub struct BookReport {
    pub book_id: BookId,
    pub reason: ReportReason,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// Unix timestamp in seconds
    pub submitted_at: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq, Apiv2Schema)]
pub struct GetReportsResponse {
    pub reports: Vec<BookReport>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq, Apiv2Schema)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq, Apiv2Schema)]
pub struct GetContactMessagesResponse {
    pub messages: Vec<ContactMessage>,
}
