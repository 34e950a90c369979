use crate::api::{BookRecord, CartEntry};
use crate::shopping_store::{ShoppingStore, ShoppingStoreError};

#[derive(Default)]
pub struct InMemoryShoppingStore {
    favorites: parking_lot::RwLock<Vec<BookRecord>>,
    cart: parking_lot::RwLock<Vec<CartEntry>>,
}

#[async_trait::async_trait]
impl ShoppingStore for InMemoryShoppingStore {
    async fn load_favorites(&self) -> Result<Vec<BookRecord>, ShoppingStoreError> {
        Ok(self.favorites.read().clone())
    }

    async fn store_favorites(
        &self,
        favorites: Vec<BookRecord>,
    ) -> Result<(), ShoppingStoreError> {
        *self.favorites.write() = favorites;
        Ok(())
    }

    async fn load_cart(&self) -> Result<Vec<CartEntry>, ShoppingStoreError> {
        Ok(self.cart.read().clone())
    }

    async fn store_cart(&self, entries: Vec<CartEntry>) -> Result<(), ShoppingStoreError> {
        *self.cart.write() = entries;
        Ok(())
    }
}
