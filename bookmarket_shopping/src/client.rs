use anyhow::{bail, Context};
use reqwest::StatusCode;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_tracing::TracingMiddleware;

use crate::api::{
    AddToCartRequest, BookId, BookRecord, CartEntry, CartResponse, CheckoutOptionsResponse,
    CheckoutRequest, FavoritesResponse, OrderReceipt, PaymentMethod, ShippingTier,
    ToggleFavoriteResponse,
};

pub struct ShoppingClient {
    url: String,
    client: ClientWithMiddleware,
}

impl ShoppingClient {
    pub fn new(url: &str) -> anyhow::Result<Self> {
        let reqwest_client = reqwest::Client::builder()
            .build()
            .context("Failed to build reqwest client")?;
        let client = ClientBuilder::new(reqwest_client)
            // Insert the tracing middleware
            .with(TracingMiddleware::default())
            .build();

        Ok(Self {
            url: url.to_string(),
            client,
        })
    }

    /// Calls GET /api/cart endpoint
    pub async fn get_cart(&self) -> anyhow::Result<Vec<CartEntry>> {
        let response = self
            .client
            .get(format!("{}/api/cart", self.url))
            .send()
            .await?;
        if response.status().is_success() {
            let body: CartResponse = response.json().await?;
            Ok(body.items)
        } else {
            let error: String = response.json().await.unwrap_or_default();
            bail!("Failed to get cart {}", error)
        }
    }

    /// Calls POST /api/cart endpoint
    /// Re-adding a book that is already in the cart increments its quantity
    pub async fn add_to_cart(&self, book: BookRecord, quantity: u32) -> anyhow::Result<()> {
        let response = self
            .client
            .post(format!("{}/api/cart", self.url))
            .json(&AddToCartRequest { book, quantity })
            .send()
            .await?;
        if response.status().is_success() {
            Ok(())
        } else {
            let error: String = response.json().await.unwrap_or_default();
            bail!("Failed to add to cart {}", error)
        }
    }

    /// Calls DELETE /api/cart/{book_id} endpoint
    /// Returns true if the entry was removed and false if the book was not in the cart
    pub async fn remove_from_cart(&self, book_id: BookId) -> anyhow::Result<bool> {
        let response = self
            .client
            .delete(format!("{}/api/cart/{}", self.url, book_id))
            .send()
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            Ok(false)
        } else if response.status().is_success() {
            Ok(true)
        } else {
            let error: String = response.json().await.unwrap_or_default();
            bail!("Failed to remove from cart {}", error)
        }
    }

    /// Calls GET /api/favorites endpoint
    pub async fn get_favorites(&self) -> anyhow::Result<Vec<BookRecord>> {
        let response = self
            .client
            .get(format!("{}/api/favorites", self.url))
            .send()
            .await?;
        if response.status().is_success() {
            let body: FavoritesResponse = response.json().await?;
            Ok(body.books)
        } else {
            let error: String = response.json().await.unwrap_or_default();
            bail!("Failed to get favorites {}", error)
        }
    }

    /// Calls POST /api/favorites/toggle endpoint
    /// Returns whether the book is a favorite after the toggle
    pub async fn toggle_favorite(&self, book: BookRecord) -> anyhow::Result<bool> {
        let response = self
            .client
            .post(format!("{}/api/favorites/toggle", self.url))
            .json(&book)
            .send()
            .await?;
        if response.status().is_success() {
            let body: ToggleFavoriteResponse = response.json().await?;
            Ok(body.favorite)
        } else {
            let error: String = response.json().await.unwrap_or_default();
            bail!("Failed to toggle favorite {}", error)
        }
    }

    /// Calls GET /api/checkout/options endpoint
    pub async fn get_checkout_options(&self) -> anyhow::Result<CheckoutOptionsResponse> {
        let response = self
            .client
            .get(format!("{}/api/checkout/options", self.url))
            .send()
            .await?;
        if response.status().is_success() {
            Ok(response.json().await?)
        } else {
            let error: String = response.json().await.unwrap_or_default();
            bail!("Failed to get checkout options {}", error)
        }
    }

    /// Calls POST /api/checkout endpoint
    /// Returns the receipt, or None when the cart was empty
    pub async fn place_order(
        &self,
        shipping: ShippingTier,
        payment: PaymentMethod,
    ) -> anyhow::Result<Option<OrderReceipt>> {
        let response = self
            .client
            .post(format!("{}/api/checkout", self.url))
            .json(&CheckoutRequest { shipping, payment })
            .send()
            .await?;
        if response.status() == StatusCode::CONFLICT {
            Ok(None)
        } else if response.status().is_success() {
            Ok(Some(response.json().await?))
        } else {
            let error: String = response.json().await.unwrap_or_default();
            bail!("Failed to place order {}", error)
        }
    }
}
