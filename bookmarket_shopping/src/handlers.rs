use std::sync::Arc;

use actix_web::web::Data;
use actix_web::Error;
use actix_web::HttpResponse;
use paperclip::actix::{
    api_v2_operation,
    web::{self},
};

use crate::api::{
    AddToCartRequest, BookId, BookRecord, CartResponse, CheckoutOptionsResponse, CheckoutRequest,
    FavoritesResponse, OrderReceipt, PaymentMethod, ShippingTier, ToggleFavoriteResponse,
};
use crate::cart;
use crate::checkout::{generate_order_id, OrderTotals};
use crate::payment::PaymentAuthorizer;
use crate::shopping_store::ShoppingStore;

#[api_v2_operation]
pub async fn health() -> Result<HttpResponse, Error> {
    Ok(HttpResponse::Ok().finish())
}

#[api_v2_operation]
pub async fn get_cart(
    shopping_store: Data<Arc<dyn ShoppingStore>>,
) -> Result<HttpResponse, Error> {
    Ok(match shopping_store.load_cart().await {
        Ok(items) => HttpResponse::Ok().json(CartResponse { items }),
        Err(err) => {
            tracing::error!("Get cart failed {}", err);
            HttpResponse::InternalServerError().finish()
        }
    })
}

#[api_v2_operation]
pub async fn add_to_cart(
    shopping_store: Data<Arc<dyn ShoppingStore>>,
    request: web::Json<AddToCartRequest>,
) -> Result<HttpResponse, Error> {
    let request = request.into_inner();
    if request.quantity == 0 {
        return Ok(HttpResponse::BadRequest().body("Quantity must be at least 1"));
    }

    let mut entries = match shopping_store.load_cart().await {
        Ok(entries) => entries,
        Err(err) => {
            tracing::error!("Add to cart failed {}", err);
            return Ok(HttpResponse::InternalServerError().finish());
        }
    };

    cart::add_to_cart(&mut entries, request.book, request.quantity);

    Ok(match shopping_store.store_cart(entries).await {
        Ok(()) => HttpResponse::Ok().finish(),
        Err(err) => {
            tracing::error!("Add to cart failed {}", err);
            HttpResponse::InternalServerError().finish()
        }
    })
}

#[api_v2_operation]
pub async fn remove_from_cart(
    shopping_store: Data<Arc<dyn ShoppingStore>>,
    book_id: web::Path<BookId>,
) -> Result<HttpResponse, Error> {
    let book_id = book_id.into_inner();

    let mut entries = match shopping_store.load_cart().await {
        Ok(entries) => entries,
        Err(err) => {
            tracing::error!("Remove from cart failed {}", err);
            return Ok(HttpResponse::InternalServerError().finish());
        }
    };

    if !cart::remove_from_cart(&mut entries, book_id) {
        return Ok(HttpResponse::NotFound().finish());
    }

    Ok(match shopping_store.store_cart(entries).await {
        Ok(()) => HttpResponse::Ok().finish(),
        Err(err) => {
            tracing::error!("Remove from cart failed {}", err);
            HttpResponse::InternalServerError().finish()
        }
    })
}

#[api_v2_operation]
pub async fn get_favorites(
    shopping_store: Data<Arc<dyn ShoppingStore>>,
) -> Result<HttpResponse, Error> {
    Ok(match shopping_store.load_favorites().await {
        Ok(books) => HttpResponse::Ok().json(FavoritesResponse { books }),
        Err(err) => {
            tracing::error!("Get favorites failed {}", err);
            HttpResponse::InternalServerError().finish()
        }
    })
}

#[api_v2_operation]
pub async fn toggle_favorite(
    shopping_store: Data<Arc<dyn ShoppingStore>>,
    book: web::Json<BookRecord>,
) -> Result<HttpResponse, Error> {
    let mut favorites = match shopping_store.load_favorites().await {
        Ok(favorites) => favorites,
        Err(err) => {
            tracing::error!("Toggle favorite failed {}", err);
            return Ok(HttpResponse::InternalServerError().finish());
        }
    };

    let favorite = cart::toggle_favorite(&mut favorites, book.into_inner());

    Ok(match shopping_store.store_favorites(favorites).await {
        Ok(()) => HttpResponse::Ok().json(ToggleFavoriteResponse { favorite }),
        Err(err) => {
            tracing::error!("Toggle favorite failed {}", err);
            HttpResponse::InternalServerError().finish()
        }
    })
}

#[api_v2_operation]
pub async fn get_checkout_options() -> Result<HttpResponse, Error> {
    Ok(HttpResponse::Ok().json(CheckoutOptionsResponse {
        shipping_options: ShippingTier::ALL.iter().map(|tier| tier.option()).collect(),
        payment_methods: PaymentMethod::ALL
            .iter()
            .map(|method| method.details())
            .collect(),
    }))
}

#[api_v2_operation]
pub async fn place_order(
    shopping_store: Data<Arc<dyn ShoppingStore>>,
    payment_authorizer: Data<PaymentAuthorizer>,
    request: web::Json<CheckoutRequest>,
) -> Result<HttpResponse, Error> {
    let request = request.into_inner();

    let items = match shopping_store.load_cart().await {
        Ok(items) => items,
        Err(err) => {
            tracing::error!("Place order failed {}", err);
            return Ok(HttpResponse::InternalServerError().finish());
        }
    };

    if items.is_empty() {
        return Ok(HttpResponse::Conflict().body("Cart is empty"));
    }

    let totals = OrderTotals::for_entries(&items);
    let shipping = request.shipping.option();
    let payment = request.payment.details();
    let total = totals.payable_with_shipping(shipping.price);

    if let Err(err) = payment_authorizer.authorize(request.payment, total).await {
        tracing::error!("Payment authorization failed {}", err);
        return Ok(HttpResponse::InternalServerError().finish());
    }

    // The order is final, the cart starts over
    if let Err(err) = shopping_store.store_cart(vec![]).await {
        tracing::error!("Place order failed {}", err);
        return Ok(HttpResponse::InternalServerError().finish());
    }

    let receipt = OrderReceipt {
        order_id: generate_order_id(),
        items,
        subtotal: totals.subtotal,
        tax: totals.tax,
        shipping,
        payment,
        total,
    };
    tracing::info!("Order {} placed for {}", receipt.order_id, receipt.total);

    Ok(HttpResponse::Ok().json(receipt))
}
