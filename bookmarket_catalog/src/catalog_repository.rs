pub use in_memory_catalog_repository::InMemoryCatalogRepository;
pub use postgres_catalog_repository::{PostgresCatalogRepository, PostgresCatalogRepositoryConfig};

use crate::api;
use crate::api::{BookDetails, BookId, BookTitleAndId};

mod in_memory_catalog_repository;
mod postgres_catalog_repository;

#[derive(thiserror::Error, Debug)]
pub enum CatalogRepositoryError {
    #[error("Book {0} not found")]
    NotFound(BookId),

    #[error("Failed to deserialize book: {0}")]
    DeserializationError(#[from] serde_json::Error),

    #[error("DatabaseFailure failure {0}")]
    DatabaseFailure(#[from] tokio_postgres::Error),

    #[error("Other error {0}")]
    Other(String),
}

#[async_trait::async_trait]
pub trait CatalogRepository {
    /// Adds a book listing to the catalog, returns the id assigned to it
    async fn add_book(&self, details: BookDetails) -> Result<BookId, CatalogRepositoryError>;
    /// Merges the patch into an existing listing,
    /// returns true if the book was updated and false if it was not found
    async fn update_book(
        &self,
        book_id: BookId,
        patch: api::BookDetailsPatch,
    ) -> Result<bool, CatalogRepositoryError>;
    /// Retrieves the full listing for a book
    async fn get_book(&self, book_id: BookId) -> Result<BookDetails, CatalogRepositoryError>;
    /// Lists ids and titles of every book in the catalog
    async fn list_books(&self) -> Result<Vec<BookTitleAndId>, CatalogRepositoryError>;
}
