use std::sync::Arc;

use actix_web::http::header::LOCATION;
use actix_web::web::Data;
use actix_web::Error;
use actix_web::HttpResponse;
use paperclip::actix::{
    api_v2_operation,
    web::{self},
};

use crate::api::{BookDetails, BookDetailsPatch, BookId, GetAllBooksResponse};
use crate::catalog_repository::{CatalogRepository, CatalogRepositoryError};

#[api_v2_operation]
pub async fn health() -> Result<HttpResponse, Error> {
    Ok(HttpResponse::Ok().finish())
}

#[api_v2_operation]
pub async fn get_all_books(
    catalog_repository: Data<Arc<dyn CatalogRepository + Send + Sync>>,
) -> Result<HttpResponse, Error> {
    Ok(match catalog_repository.list_books().await {
        Ok(books) => HttpResponse::Ok().json(GetAllBooksResponse { books }),
        Err(err) => {
            tracing::error!("Get all books failed {}", err);
            HttpResponse::InternalServerError().finish()
        }
    })
}

#[api_v2_operation]
pub async fn add_book(
    catalog_repository: Data<Arc<dyn CatalogRepository + Send + Sync>>,
    details: web::Json<BookDetails>,
) -> Result<HttpResponse, Error> {
    Ok(
        match catalog_repository.add_book(details.into_inner()).await {
            Ok(book_id) => HttpResponse::Ok()
                .append_header((LOCATION, format!("/api/book/{}", book_id)))
                .finish(),
            Err(err) => {
                tracing::error!("Add book failed {}", err);
                HttpResponse::InternalServerError().finish()
            }
        },
    )
}

#[api_v2_operation]
pub async fn update_book(
    catalog_repository: Data<Arc<dyn CatalogRepository + Send + Sync>>,
    book_id: web::Path<BookId>,
    patch: web::Json<BookDetailsPatch>,
) -> Result<HttpResponse, Error> {
    Ok(
        match catalog_repository
            .update_book(book_id.into_inner(), patch.into_inner())
            .await
        {
            Ok(true) => HttpResponse::Ok().finish(),
            Ok(false) | Err(CatalogRepositoryError::NotFound(_)) => {
                HttpResponse::NotFound().finish()
            }
            Err(err) => {
                tracing::error!("Update book failed {}", err);
                HttpResponse::InternalServerError().finish()
            }
        },
    )
}

#[api_v2_operation]
pub async fn get_book(
    catalog_repository: Data<Arc<dyn CatalogRepository + Send + Sync>>,
    book_id: web::Path<BookId>,
) -> Result<HttpResponse, Error> {
    Ok(
        match catalog_repository.get_book(book_id.into_inner()).await {
            Ok(book_details) => HttpResponse::Ok().json(book_details),
            Err(CatalogRepositoryError::NotFound(_)) => HttpResponse::NotFound().finish(),
            Err(err) => {
                tracing::error!("Get book failed {}", err);
                HttpResponse::InternalServerError().finish()
            }
        },
    )
}
