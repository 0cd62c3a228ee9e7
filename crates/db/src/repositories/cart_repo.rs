//! Repository for the `carts` and `cart_items` tables.
//!
//! Every item mutation takes the acting user's id and joins through `carts`,
//! so a user can never touch a line in somebody else's cart: the item simply
//! is not found.

use bely_core::types::DbId;
use sqlx::PgPool;

use crate::models::cart::{Cart, CartItem, CartItemDetail};

/// Column list for `carts`.
const CART_COLUMNS: &str = "id, user_id, created_at, updated_at";

/// Column list for `cart_items`.
const ITEM_COLUMNS: &str = "id, cart_id, product_id, quantity, created_at, updated_at";

/// `cart_items` columns qualified with the `ci` alias, for joined mutations.
const ITEM_COLUMNS_QUALIFIED: &str =
    "ci.id, ci.cart_id, ci.product_id, ci.quantity, ci.created_at, ci.updated_at";

/// Provides cart lookup and item mutations.
pub struct CartRepo;

impl CartRepo {
    /// Return the user's cart, creating it if needed.
    ///
    /// A single upsert against `uq_carts_user`, so concurrent first requests
    /// converge on the same row.
    pub async fn get_or_create(pool: &PgPool, user_id: DbId) -> Result<Cart, sqlx::Error> {
        let query = format!(
            "INSERT INTO carts (user_id) VALUES ($1) \
             ON CONFLICT ON CONSTRAINT uq_carts_user DO UPDATE SET user_id = EXCLUDED.user_id \
             RETURNING {CART_COLUMNS}"
        );
        sqlx::query_as::<_, Cart>(&query)
            .bind(user_id)
            .fetch_one(pool)
            .await
    }

    /// Add `quantity` units of a product, incrementing an existing line.
    pub async fn add_item(
        pool: &PgPool,
        cart_id: DbId,
        product_id: DbId,
        quantity: i32,
    ) -> Result<CartItem, sqlx::Error> {
        let query = format!(
            "INSERT INTO cart_items (cart_id, product_id, quantity) \
             VALUES ($1, $2, $3) \
             ON CONFLICT ON CONSTRAINT uq_cart_items_cart_product \
             DO UPDATE SET quantity = cart_items.quantity + EXCLUDED.quantity \
             RETURNING {ITEM_COLUMNS}"
        );
        sqlx::query_as::<_, CartItem>(&query)
            .bind(cart_id)
            .bind(product_id)
            .bind(quantity)
            .fetch_one(pool)
            .await
    }

    /// Items of a cart with current product title and price, oldest first.
    pub async fn list_items(
        pool: &PgPool,
        cart_id: DbId,
    ) -> Result<Vec<CartItemDetail>, sqlx::Error> {
        sqlx::query_as::<_, CartItemDetail>(
            "SELECT ci.id, ci.product_id, p.title AS product_title, \
                    p.image_path AS product_image_path, p.price AS unit_price, ci.quantity \
             FROM cart_items ci JOIN products p ON p.id = ci.product_id \
             WHERE ci.cart_id = $1 \
             ORDER BY ci.created_at, ci.id",
        )
        .bind(cart_id)
        .fetch_all(pool)
        .await
    }

    /// Set the quantity of an item in `user_id`'s cart.
    ///
    /// Returns `None` if the item does not exist or belongs to another cart.
    pub async fn update_quantity(
        pool: &PgPool,
        user_id: DbId,
        item_id: DbId,
        quantity: i32,
    ) -> Result<Option<CartItem>, sqlx::Error> {
        let query = format!(
            "UPDATE cart_items ci SET quantity = $3 \
             FROM carts c \
             WHERE ci.id = $1 AND ci.cart_id = c.id AND c.user_id = $2 \
             RETURNING {ITEM_COLUMNS_QUALIFIED}"
        );
        sqlx::query_as::<_, CartItem>(&query)
            .bind(item_id)
            .bind(user_id)
            .bind(quantity)
            .fetch_optional(pool)
            .await
    }

    /// Remove an item from `user_id`'s cart. Returns `true` if a row was removed.
    pub async fn remove_item(
        pool: &PgPool,
        user_id: DbId,
        item_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM cart_items ci USING carts c \
             WHERE ci.id = $1 AND ci.cart_id = c.id AND c.user_id = $2",
        )
        .bind(item_id)
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Remove every item from `user_id`'s cart. Returns the number removed.
    pub async fn clear(pool: &PgPool, user_id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM cart_items ci USING carts c \
             WHERE ci.cart_id = c.id AND c.user_id = $1",
        )
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }
}
