use std::collections::HashMap;
use std::sync::atomic::{AtomicI32, Ordering};

use serde_json::json;

use crate::api;
use crate::api::{BookDetails, BookId, BookTitleAndId};
use crate::catalog_repository::{CatalogRepository, CatalogRepositoryError};

pub struct InMemoryCatalogRepository {
    book_sequence_generator: AtomicI32,
    books: parking_lot::RwLock<HashMap<BookId, BookDetails>>,
}

impl Default for InMemoryCatalogRepository {
    fn default() -> Self {
        Self {
            book_sequence_generator: Default::default(),
            books: Default::default(),
        }
    }
}

#[async_trait::async_trait]
impl CatalogRepository for InMemoryCatalogRepository {
    async fn add_book(&self, details: api::BookDetails) -> Result<BookId, CatalogRepositoryError> {
        let id = self.book_sequence_generator.fetch_add(1, Ordering::Relaxed);
        self.books.write().insert(id, details);
        Ok(id)
    }

    async fn update_book(
        &self,
        book_id: BookId,
        patch: api::BookDetailsPatch,
    ) -> Result<bool, CatalogRepositoryError> {
        let mut locked_books = self.books.write();
        if let Some(book) = locked_books.get_mut(&book_id) {
            let mut result_book = json!(book);
            json_patch::merge(&mut result_book, &json!(patch));
            let result_book: BookDetails = serde_json::from_value(result_book)?;
            *book = result_book;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn get_book(&self, book_id: BookId) -> Result<BookDetails, CatalogRepositoryError> {
        self.books
            .read()
            .get(&book_id)
            .cloned()
            .ok_or(CatalogRepositoryError::NotFound(book_id))
    }

    async fn list_books(&self) -> Result<Vec<BookTitleAndId>, CatalogRepositoryError> {
        Ok(self
            .books
            .read()
            .iter()
            .map(|(&book_id, details)| BookTitleAndId {
                book_id,
                title: details.title.clone(),
            })
            .collect())
    }
}

#[cfg(test)]
mod in_memory_catalog_repository_tests {
    use crate::api::{BookDetails, BookDetailsPatch, BookTitleAndId, Price};
    use crate::catalog_repository::{
        CatalogRepository, CatalogRepositoryError, InMemoryCatalogRepository,
    };

    fn sample_listing(title: &str) -> BookDetails {
        BookDetails {
            title: title.to_string(),
            author: "Matt Haig".to_string(),
            category: "Fiction".to_string(),
            price: Price::new(13.99),
            description: "Between life and death there is a library.".to_string(),
            image_url: None,
            posted: false,
        }
    }

    #[tokio::test]
    /// Tests if add_book and get_book work correctly
    /// 1. Asks for a book that was never added - expects NotFound
    /// 2. Adds a book
    /// 3. Gets it back and compares
    async fn test_add_book_and_get_it() {
        let repo = InMemoryCatalogRepository::default();

        let not_existing_book_id = 20000;
        let book_not_found = repo.get_book(not_existing_book_id).await;
        assert!(matches!(
            book_not_found,
            Err(CatalogRepositoryError::NotFound(..))
        ));

        let book_details = sample_listing("The Midnight Library");
        let id = repo
            .add_book(book_details.clone())
            .await
            .expect("Failed to add book");

        let details = repo.get_book(id).await.expect("Failed to get book");
        assert_eq!(details, book_details);
    }

    #[tokio::test]
    /// Tests if list_books returns every added listing with its id
    async fn test_add_books_and_list_them() {
        let repo = InMemoryCatalogRepository::default();

        let list = repo.list_books().await.expect("Failed to list books");
        assert_eq!(list, vec![]);

        let book1_details = sample_listing("Atomic Habits");
        let book2_details = BookDetails {
            title: "Sapiens".to_string(),
            ..book1_details.clone()
        };

        let id_1 = repo
            .add_book(book1_details)
            .await
            .expect("Failed to add book");
        let id_2 = repo
            .add_book(book2_details)
            .await
            .expect("Failed to add book");

        let mut list = repo.list_books().await.expect("Failed to list books");
        list.sort_by_key(|i| i.book_id);

        assert_eq!(
            list,
            vec![
                BookTitleAndId {
                    book_id: id_1,
                    title: "Atomic Habits".to_string(),
                },
                BookTitleAndId {
                    book_id: id_2,
                    title: "Sapiens".to_string(),
                }
            ]
        );
    }

    #[tokio::test]
    /// Tests merge patching of a listing
    /// 1. Patches a missing book - expects false
    /// 2. Adds a book and patches the price only
    /// 3. Patches several fields at once, including the posted flag
    async fn test_add_book_patch_and_get_it() {
        let repo = InMemoryCatalogRepository::default();
        let not_existing_book = 2000;
        let result = repo
            .update_book(not_existing_book, BookDetailsPatch::default())
            .await
            .expect("Failed to update");
        // false means nothing to update
        assert!(!result);

        let book_details = sample_listing("Clean Code");
        let id = repo
            .add_book(book_details.clone())
            .await
            .expect("Failed to add book");

        let patch_price_only = BookDetailsPatch {
            price: Some(Price::new(24.5)),
            ..BookDetailsPatch::default()
        };
        let patch_result = repo
            .update_book(id, patch_price_only)
            .await
            .expect("Failed to patch");
        assert!(patch_result);

        let expected_with_patched_price = BookDetails {
            price: Price::new(24.5),
            ..book_details.clone()
        };
        assert_eq!(
            repo.get_book(id).await.unwrap(),
            expected_with_patched_price
        );

        let patch_several_fields = BookDetailsPatch {
            title: Some("Clean Code (used)".to_string()),
            description: Some("Well-thumbed copy, some margin notes.".to_string()),
            image_url: Some("https://images.bookmarket.test/clean-code.png".to_string()),
            posted: Some(true),
            ..BookDetailsPatch::default()
        };
        let patch_result = repo
            .update_book(id, patch_several_fields)
            .await
            .expect("Failed to patch");
        assert!(patch_result);

        let expected_after_patch = BookDetails {
            title: "Clean Code (used)".to_string(),
            price: Price::new(24.5),
            description: "Well-thumbed copy, some margin notes.".to_string(),
            image_url: Some("https://images.bookmarket.test/clean-code.png".to_string()),
            posted: true,
            ..book_details
        };
        assert_eq!(repo.get_book(id).await.unwrap(), expected_after_patch);
    }
}
