use std::sync::Arc;

use actix_web::http::header::LOCATION;
use actix_web::web::Data;
use actix_web::Error;
use actix_web::HttpResponse;
use paperclip::actix::{
    api_v2_operation,
    web::{self},
};

use crate::api::{
    BookId, BookReportDraft, ContactMessage, GetContactMessagesResponse, GetReportsResponse,
    ReviewDraft, ReviewsResponse,
};
use crate::book_checker::BookPresenceChecker;
use crate::engagement_repository::EngagementRepository;
use crate::review_summary::summarize;

#[api_v2_operation]
pub async fn health() -> Result<HttpResponse, Error> {
    Ok(HttpResponse::Ok().finish())
}

#[api_v2_operation]
pub async fn get_reviews(
    engagement_repository: Data<Arc<dyn EngagementRepository>>,
    book_id: web::Path<BookId>,
) -> Result<HttpResponse, Error> {
    Ok(
        match engagement_repository.list_reviews(book_id.into_inner()).await {
            Ok(reviews) => HttpResponse::Ok().json(ReviewsResponse {
                summary: summarize(&reviews),
                reviews,
            }),
            Err(err) => {
                tracing::error!("Get reviews failed {}", err);
                HttpResponse::InternalServerError().finish()
            }
        },
    )
}

#[api_v2_operation]
pub async fn add_review(
    engagement_repository: Data<Arc<dyn EngagementRepository>>,
    book_checker: Data<BookPresenceChecker>,
    book_id: web::Path<BookId>,
    draft: web::Json<ReviewDraft>,
) -> Result<HttpResponse, Error> {
    let book_id = book_id.into_inner();
    let draft = draft.into_inner();

    if draft.rating == 0 {
        return Ok(HttpResponse::BadRequest().body("Please select a rating"));
    }
    if draft.rating > 5 {
        return Ok(HttpResponse::BadRequest().body("Rating must be between 1 and 5"));
    }
    if draft.review.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().body("Please write a review"));
    }

    match book_checker.check_book_exists(book_id).await {
        Ok(true) => {}
        Ok(false) => return Ok(HttpResponse::NotFound().finish()),
        Err(err) => {
            tracing::error!("Book presence check failed {}", err);
            return Ok(HttpResponse::InternalServerError().finish());
        }
    }

    Ok(match engagement_repository.add_review(book_id, draft).await {
        Ok(review_id) => HttpResponse::Ok()
            .append_header((
                LOCATION,
                format!("/api/book/{}/review/{}", book_id, review_id),
            ))
            .finish(),
        Err(err) => {
            tracing::error!("Add review failed {}", err);
            HttpResponse::InternalServerError().finish()
        }
    })
}

#[api_v2_operation]
pub async fn report_book(
    engagement_repository: Data<Arc<dyn EngagementRepository>>,
    book_checker: Data<BookPresenceChecker>,
    book_id: web::Path<BookId>,
    draft: web::Json<BookReportDraft>,
) -> Result<HttpResponse, Error> {
    let book_id = book_id.into_inner();

    match book_checker.check_book_exists(book_id).await {
        Ok(true) => {}
        Ok(false) => return Ok(HttpResponse::NotFound().finish()),
        Err(err) => {
            tracing::error!("Book presence check failed {}", err);
            return Ok(HttpResponse::InternalServerError().finish());
        }
    }

    Ok(
        match engagement_repository
            .add_report(book_id, draft.into_inner())
            .await
        {
            Ok(()) => HttpResponse::Ok().finish(),
            Err(err) => {
                tracing::error!("Report book failed {}", err);
                HttpResponse::InternalServerError().finish()
            }
        },
    )
}

#[api_v2_operation]
pub async fn get_reports(
    engagement_repository: Data<Arc<dyn EngagementRepository>>,
    book_id: web::Path<BookId>,
) -> Result<HttpResponse, Error> {
    Ok(
        match engagement_repository.list_reports(book_id.into_inner()).await {
            Ok(reports) => HttpResponse::Ok().json(GetReportsResponse { reports }),
            Err(err) => {
                tracing::error!("Get reports failed {}", err);
                HttpResponse::InternalServerError().finish()
            }
        },
    )
}

#[api_v2_operation]
pub async fn add_contact_message(
    engagement_repository: Data<Arc<dyn EngagementRepository>>,
    message: web::Json<ContactMessage>,
) -> Result<HttpResponse, Error> {
    let message = message.into_inner();

    if message.name.trim().is_empty()
        || message.email.trim().is_empty()
        || message.message.trim().is_empty()
    {
        return Ok(HttpResponse::BadRequest().body("Please fill in all fields"));
    }

    Ok(
        match engagement_repository.add_contact_message(message).await {
            Ok(()) => HttpResponse::Ok().finish(),
            Err(err) => {
                tracing::error!("Add contact message failed {}", err);
                HttpResponse::InternalServerError().finish()
            }
        },
    )
}

#[api_v2_operation]
pub async fn get_contact_messages(
    engagement_repository: Data<Arc<dyn EngagementRepository>>,
) -> Result<HttpResponse, Error> {
    Ok(match engagement_repository.list_contact_messages().await {
        Ok(messages) => HttpResponse::Ok().json(GetContactMessagesResponse { messages }),
        Err(err) => {
            tracing::error!("Get contact messages failed {}", err);
            HttpResponse::InternalServerError().finish()
        }
    })
}
