//! Cart and cart item models.

use bely_core::cart::{cart_total, item_count, CartLine};
use bely_core::types::{DbId, Timestamp};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `carts` table. One per user.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Cart {
    pub id: DbId,
    pub user_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `cart_items` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CartItem {
    pub id: DbId,
    pub cart_id: DbId,
    pub product_id: DbId,
    pub quantity: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A cart item joined with the product's current title and price.
#[derive(Debug, Clone, FromRow)]
pub struct CartItemDetail {
    pub id: DbId,
    pub product_id: DbId,
    pub product_title: String,
    pub product_image_path: Option<String>,
    pub unit_price: Decimal,
    pub quantity: i32,
}

impl CartLine for CartItemDetail {
    fn unit_price(&self) -> Decimal {
        self.unit_price
    }

    fn quantity(&self) -> i32 {
        self.quantity
    }
}

/// One priced line of a [`CartView`].
#[derive(Debug, Clone, Serialize)]
pub struct CartItemView {
    pub id: DbId,
    pub product_id: DbId,
    pub product_title: String,
    pub product_image_path: Option<String>,
    pub unit_price: Decimal,
    pub quantity: i32,
    pub subtotal: Decimal,
}

/// A cart with every line priced and the total computed at read time.
#[derive(Debug, Clone, Serialize)]
pub struct CartView {
    pub id: DbId,
    pub items: Vec<CartItemView>,
    pub item_count: i64,
    pub total_price: Decimal,
    pub updated_at: Timestamp,
}

impl CartView {
    pub fn build(cart: &Cart, items: Vec<CartItemDetail>) -> Self {
        let total_price = cart_total(&items);
        let item_count = item_count(&items);
        let items = items
            .into_iter()
            .map(|item| CartItemView {
                subtotal: item.subtotal(),
                id: item.id,
                product_id: item.product_id,
                product_title: item.product_title,
                product_image_path: item.product_image_path,
                unit_price: item.unit_price,
                quantity: item.quantity,
            })
            .collect();
        Self {
            id: cart.id,
            items,
            item_count,
            total_price,
            updated_at: cart.updated_at,
        }
    }
}

/// Request body for `POST /cart/items`.
#[derive(Debug, Clone, Deserialize)]
pub struct AddCartItem {
    pub product_id: DbId,
    pub quantity: Option<i32>,
}

/// Request body for `PUT /cart/items/{id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateCartItem {
    pub quantity: i32,
}
