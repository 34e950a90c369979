use bookmarket_catalog::api::{BookDetails, BookDetailsPatch, Price};
use bookmarket_catalog::client::CatalogClient;
use bookmarket_engagement::api::{BookReportDraft, ContactMessage, ReportReason, ReviewDraft};
use bookmarket_engagement::client::EngagementClient;
use bookmarket_shopping::api::{BookRecord, PaymentMethod, ShippingTier};
use bookmarket_shopping::client::ShoppingClient;

const CATALOG_URL: &str = "http://127.0.0.1:8001";
const SHOPPING_URL: &str = "http://127.0.0.1:8002";
const ENGAGEMENT_URL: &str = "http://127.0.0.1:8003";

fn sample_book_details(title: &str, price: f64) -> BookDetails {
    BookDetails {
        title: title.to_string(),
        author: "Yuval Noah Harari".to_string(),
        category: "History".to_string(),
        price: Price::new(price),
        description: "A brief history of humankind.".to_string(),
        image_url: None,
        posted: false,
    }
}

fn book_record(book_id: i32, details: &BookDetails) -> BookRecord {
    BookRecord {
        book_id,
        title: details.title.clone(),
        author: details.author.clone(),
        category: details.category.clone(),
        price: details.price,
        description: details.description.clone(),
        image_url: details.image_url.clone(),
        posted: details.posted,
    }
}

#[tokio::test]
/// Simple test for the catalog service
/// Creates a book listing
/// Gets the book
/// Patches the price and the posted flag
/// Gets list of books and checks if the book is there
async fn catalog_e2e_test() {
    let catalog_client = CatalogClient::new(CATALOG_URL).expect("Failed to create client");

    let book_details = sample_book_details("Sapiens", 14.99);

    let book_id = catalog_client
        .add_book(book_details.clone())
        .await
        .expect("Failed to add book");

    let returned_book_details = catalog_client
        .get_book(book_id)
        .await
        .expect("Failed to get book")
        .expect("Book not found");

    assert_eq!(returned_book_details, book_details);

    let book_patch = BookDetailsPatch {
        price: Some(Price::new(9.99)),
        posted: Some(true),
        ..BookDetailsPatch::default()
    };

    let patched = catalog_client
        .update_book(book_id, book_patch)
        .await
        .expect("Failed to patch book");
    assert!(patched);

    let returned_book_details = catalog_client
        .get_book(book_id)
        .await
        .expect("Failed to get book")
        .expect("Book not found");

    let patched_book_details = BookDetails {
        price: Price::new(9.99),
        posted: true,
        ..book_details
    };
    assert_eq!(returned_book_details, patched_book_details);

    let books_and_titles = catalog_client
        .list_books()
        .await
        .expect("Failed to list books");

    assert!(books_and_titles
        .iter()
        .any(|id_and_title| id_and_title.book_id == book_id && id_and_title.title == "Sapiens"));
}

#[tokio::test]
/// Simple test for favorites
/// Toggles a book on, checks membership
/// Toggles again and checks it is gone
async fn favorites_e2e_test() {
    let catalog_client = CatalogClient::new(CATALOG_URL).expect("Failed to create client");
    let shopping_client = ShoppingClient::new(SHOPPING_URL).expect("Failed to create client");

    let details = sample_book_details("The Elegant Universe", 17.25);
    let book_id = catalog_client
        .add_book(details.clone())
        .await
        .expect("Failed to add book");
    let book = book_record(book_id, &details);

    let favorite = shopping_client
        .toggle_favorite(book.clone())
        .await
        .expect("Failed to toggle favorite");
    assert!(favorite);

    let favorites = shopping_client
        .get_favorites()
        .await
        .expect("Failed to get favorites");
    assert!(favorites.iter().any(|f| f.book_id == book_id));

    let favorite = shopping_client
        .toggle_favorite(book)
        .await
        .expect("Failed to toggle favorite");
    assert!(!favorite);

    let favorites = shopping_client
        .get_favorites()
        .await
        .expect("Failed to get favorites");
    assert!(!favorites.iter().any(|f| f.book_id == book_id));
}

#[tokio::test]
/// Full shopping flow
/// Adds two listings to the catalog
/// Puts them in the cart, re-adding the first to bump its quantity
/// Places the order with express shipping
/// Checks every receipt figure and that the cart was cleared
async fn checkout_e2e_test() {
    let catalog_client = CatalogClient::new(CATALOG_URL).expect("Failed to create client");
    let shopping_client = ShoppingClient::new(SHOPPING_URL).expect("Failed to create client");

    // start from a clean cart, earlier tests may have left entries behind
    for entry in shopping_client.get_cart().await.expect("Failed to get cart") {
        shopping_client
            .remove_from_cart(entry.book.book_id)
            .await
            .expect("Failed to clear cart");
    }

    let first_details = sample_book_details("The Midnight Library", 10.0);
    let second_details = sample_book_details("Ways of Seeing", 5.5);

    let first_id = catalog_client
        .add_book(first_details.clone())
        .await
        .expect("Failed to add book");
    let second_id = catalog_client
        .add_book(second_details.clone())
        .await
        .expect("Failed to add book");

    let first_book = book_record(first_id, &first_details);
    let second_book = book_record(second_id, &second_details);

    shopping_client
        .add_to_cart(first_book.clone(), 1)
        .await
        .expect("Failed to add to cart");
    shopping_client
        .add_to_cart(second_book, 1)
        .await
        .expect("Failed to add to cart");
    // same book again, the entry's quantity goes up instead of duplicating
    shopping_client
        .add_to_cart(first_book, 1)
        .await
        .expect("Failed to add to cart");

    let cart = shopping_client.get_cart().await.expect("Failed to get cart");
    assert_eq!(cart.len(), 2);
    let first_entry = cart
        .iter()
        .find(|entry| entry.book.book_id == first_id)
        .expect("First book not in cart");
    assert_eq!(first_entry.quantity, 2);

    let options = shopping_client
        .get_checkout_options()
        .await
        .expect("Failed to get checkout options");
    assert_eq!(options.shipping_options.len(), 3);
    assert_eq!(options.payment_methods.len(), 3);

    let receipt = shopping_client
        .place_order(ShippingTier::Express, PaymentMethod::CreditCard)
        .await
        .expect("Failed to place order")
        .expect("Order rejected for empty cart");

    assert_eq!(receipt.order_id.len(), 6);
    assert_eq!(receipt.items.len(), 2);
    assert_eq!(receipt.subtotal, 25.50);
    assert_eq!(receipt.tax, 2.55);
    assert_eq!(receipt.shipping.price, 12.99);
    assert_eq!(receipt.total, 41.04);
    assert_eq!(receipt.payment.name, "Credit Card");

    // the order consumed the cart
    let cart = shopping_client.get_cart().await.expect("Failed to get cart");
    assert!(cart.is_empty());

    // checking out again with nothing in the cart is rejected
    let rejected = shopping_client
        .place_order(ShippingTier::Standard, PaymentMethod::Paypal)
        .await
        .expect("Failed to call checkout");
    assert!(rejected.is_none());
}

#[tokio::test]
/// Reviews and reports flow
/// Creates a listing
/// Posts a review and reads back the list with its summary
/// Files a report against the listing
/// Review and report against an unknown book are refused
async fn engagement_e2e_test() {
    let catalog_client = CatalogClient::new(CATALOG_URL).expect("Failed to create client");
    let engagement_client = EngagementClient::new(ENGAGEMENT_URL).expect("Failed to create client");

    let details = sample_book_details("Clean Code", 28.75);
    let book_id = catalog_client
        .add_book(details)
        .await
        .expect("Failed to add book");

    let review_id = engagement_client
        .add_review(
            book_id,
            ReviewDraft {
                reviewer: "John Doe".to_string(),
                rating: 5,
                review: "Great book! The condition was perfect and delivery was fast.".to_string(),
                pros: "Fast delivery, good condition".to_string(),
                cons: "None".to_string(),
            },
        )
        .await
        .expect("Failed to add review")
        .expect("Book not found for review");

    let reviews_response = engagement_client
        .get_reviews(book_id)
        .await
        .expect("Failed to get reviews");
    assert_eq!(reviews_response.summary.review_count, 1);
    assert_eq!(reviews_response.summary.average_rating, 5.0);
    assert_eq!(reviews_response.reviews[0].review_id, review_id);

    let reported = engagement_client
        .report_book(
            book_id,
            BookReportDraft {
                reason: ReportReason::Damaged,
                details: Some("Cover arrived torn".to_string()),
            },
        )
        .await
        .expect("Failed to report book");
    assert!(reported);

    let reports = engagement_client
        .get_reports(book_id)
        .await
        .expect("Failed to get reports");
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].reason, ReportReason::Damaged);

    let unknown_book_id = 1_000_000;
    let refused_review = engagement_client
        .add_review(
            unknown_book_id,
            ReviewDraft {
                reviewer: "Nobody".to_string(),
                rating: 1,
                review: "This book does not exist".to_string(),
                pros: "".to_string(),
                cons: "".to_string(),
            },
        )
        .await
        .expect("Failed to call add review");
    assert!(refused_review.is_none());

    let refused_report = engagement_client
        .report_book(
            unknown_book_id,
            BookReportDraft {
                reason: ReportReason::Fake,
                details: None,
            },
        )
        .await
        .expect("Failed to call report book");
    assert!(!refused_report);
}

#[tokio::test]
/// Contact form round trip
async fn contact_e2e_test() {
    let engagement_client = EngagementClient::new(ENGAGEMENT_URL).expect("Failed to create client");

    let message = ContactMessage {
        name: "Armin".to_string(),
        email: "armin@example.com".to_string(),
        message: "When will Ways of Seeing be back in stock?".to_string(),
    };
    engagement_client
        .send_contact_message(message.clone())
        .await
        .expect("Failed to send contact message");

    let messages = engagement_client
        .get_contact_messages()
        .await
        .expect("Failed to get contact messages");
    assert!(messages.contains(&message));
}
