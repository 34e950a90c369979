use crate::api::{BookId, BookRecord, CartEntry};

/// Puts a book into the cart; if an entry with the same book id already
/// exists its quantity is incremented instead of a duplicate being appended.
pub fn add_to_cart(entries: &mut Vec<CartEntry>, book: BookRecord, quantity: u32) {
    if let Some(existing) = entries
        .iter_mut()
        .find(|entry| entry.book.book_id == book.book_id)
    {
        existing.quantity += quantity;
    } else {
        entries.push(CartEntry { book, quantity });
    }
}

/// Drops the whole entry for the given book id.
/// Returns false when the book was not in the cart.
pub fn remove_from_cart(entries: &mut Vec<CartEntry>, book_id: BookId) -> bool {
    let count_before = entries.len();
    entries.retain(|entry| entry.book.book_id != book_id);
    entries.len() != count_before
}

/// Flips favorite membership for the book.
/// Returns true when the book is a favorite after the call.
pub fn toggle_favorite(favorites: &mut Vec<BookRecord>, book: BookRecord) -> bool {
    let count_before = favorites.len();
    favorites.retain(|favorite| favorite.book_id != book.book_id);
    if favorites.len() == count_before {
        favorites.push(book);
        true
    } else {
        false
    }
}

#[cfg(test)]
mod cart_tests {
    use super::*;
    use crate::api::Price;

    fn book(book_id: BookId, price: f64) -> BookRecord {
        BookRecord {
            book_id,
            title: format!("Book {}", book_id),
            author: "Author".to_string(),
            category: "Fiction".to_string(),
            price: Price::new(price),
            description: "".to_string(),
            image_url: None,
            posted: false,
        }
    }

    #[test]
    /// Re-adding the same book must increment quantity, never duplicate the entry
    fn test_add_to_cart_merges_entries_by_book_id() {
        let mut cart = vec![];

        add_to_cart(&mut cart, book(1, 10.0), 1);
        add_to_cart(&mut cart, book(2, 5.5), 2);
        add_to_cart(&mut cart, book(1, 10.0), 3);

        assert_eq!(cart.len(), 2);
        let first = cart.iter().find(|e| e.book.book_id == 1).unwrap();
        assert_eq!(first.quantity, 4);
        let second = cart.iter().find(|e| e.book.book_id == 2).unwrap();
        assert_eq!(second.quantity, 2);
    }

    #[test]
    /// Any sequence of adds keeps at most one entry per book id and
    /// the entry quantity equal to the sum of added quantities
    fn test_add_sequence_keeps_cart_invariant() {
        let mut cart = vec![];
        let additions = [(1, 1), (2, 2), (1, 1), (3, 5), (2, 1), (1, 2)];

        for (book_id, quantity) in additions {
            add_to_cart(&mut cart, book(book_id, 7.25), quantity);
        }

        for wanted_id in [1, 2, 3] {
            let matching: Vec<_> = cart
                .iter()
                .filter(|e| e.book.book_id == wanted_id)
                .collect();
            assert_eq!(matching.len(), 1);
            let expected_quantity: u32 = additions
                .iter()
                .filter(|(id, _)| *id == wanted_id)
                .map(|(_, q)| q)
                .sum();
            assert_eq!(matching[0].quantity, expected_quantity);
        }
    }

    #[test]
    /// Removal deletes the entire entry, not a single unit of quantity
    fn test_remove_from_cart_drops_whole_entry() {
        let mut cart = vec![];
        add_to_cart(&mut cart, book(1, 10.0), 3);
        add_to_cart(&mut cart, book(2, 4.0), 1);

        assert!(remove_from_cart(&mut cart, 1));
        assert_eq!(cart.len(), 1);
        assert_eq!(cart[0].book.book_id, 2);

        // removing a book that is not there reports false and changes nothing
        assert!(!remove_from_cart(&mut cart, 1));
        assert_eq!(cart.len(), 1);
    }

    #[test]
    /// Toggling twice with the same book returns to the original state
    fn test_toggle_favorite_is_an_involution() {
        let mut favorites = vec![];

        assert!(toggle_favorite(&mut favorites, book(7, 12.0)));
        assert_eq!(favorites.len(), 1);

        assert!(!toggle_favorite(&mut favorites, book(7, 12.0)));
        assert!(favorites.is_empty());
    }

    #[test]
    fn test_toggle_favorite_keeps_uniqueness_by_id() {
        let mut favorites = vec![book(1, 3.0), book(2, 4.0)];

        // same id, different snapshot of the record - still a toggle-off
        let mut changed_copy = book(2, 4.0);
        changed_copy.title = "Renamed".to_string();
        assert!(!toggle_favorite(&mut favorites, changed_copy));

        assert_eq!(favorites.len(), 1);
        assert_eq!(favorites[0].book_id, 1);
    }
}
