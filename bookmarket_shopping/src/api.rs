use paperclip::actix::Apiv2Schema;
use serde::{Deserialize, Serialize};

pub use bookmarket_catalog::api::{BookId, Price};

/// The book object handed between screens; a catalog item or a
/// user-posted listing together with its id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Apiv2Schema)]
pub struct BookRecord {
    pub book_id: BookId,
    pub title: String,
    pub author: String,
    pub category: String,
    pub price: Price,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub posted: bool,
}

/// A book in the cart; at most one entry per book id exists at any time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Apiv2Schema)]
pub struct CartEntry {
    pub book: BookRecord,
    pub quantity: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Apiv2Schema)]
pub struct CartResponse {
    pub items: Vec<CartEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Apiv2Schema)]
pub struct FavoritesResponse {
    pub books: Vec<BookRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Apiv2Schema)]
pub struct AddToCartRequest {
    pub book: BookRecord,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

fn default_quantity() -> u32 {
    1
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Apiv2Schema)]
pub struct ToggleFavoriteResponse {
    /// Whether the book is a favorite after the toggle
    pub favorite: bool,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Eq, PartialEq, Apiv2Schema)]
#[serde(rename_all = "snake_case")]
pub enum ShippingTier {
    Standard,
    Express,
    Overnight,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Apiv2Schema)]
pub struct ShippingOption {
    pub id: ShippingTier,
    pub name: String,
    pub price: f64,
    pub estimated_days: String,
    pub description: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Eq, PartialEq, Apiv2Schema)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    CreditCard,
    Paypal,
    BankTransfer,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Apiv2Schema)]
pub struct PaymentMethodDetails {
    pub id: PaymentMethod,
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Apiv2Schema)]
pub struct CheckoutOptionsResponse {
    pub shipping_options: Vec<ShippingOption>,
    pub payment_methods: Vec<PaymentMethodDetails>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Eq, PartialEq, Apiv2Schema)]
pub struct CheckoutRequest {
    pub shipping: ShippingTier,
    pub payment: PaymentMethod,
}

/// Snapshot of a finished order; produced once at placement and
/// handed back to the caller, never stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Apiv2Schema)]
pub struct OrderReceipt {
    pub order_id: String,
    pub items: Vec<CartEntry>,
    pub subtotal: f64,
    pub tax: f64,
    pub shipping: ShippingOption,
    pub payment: PaymentMethodDetails,
    /// Total payable: subtotal + tax + shipping price
    pub total: f64,
}
