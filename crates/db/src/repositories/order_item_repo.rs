//! Repository for the `order_items` table.

use furnicraft_core::pricing::line_total;
use furnicraft_core::types::DbId;
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::models::order::{OrderItem, UpdateOrderItem};

/// Column list for `order_items` queries.
pub(crate) const ITEM_COLUMNS: &str = "id, order_id, product_id, quantity, unit_price, \
                                       total_price, customizations, special_instructions, \
                                       created_at, updated_at";

/// Provides read and repricing operations for order items.
pub struct OrderItemRepo;

impl OrderItemRepo {
    /// All items of an order in insertion order.
    pub async fn list_for_order(
        pool: &PgPool,
        order_id: DbId,
    ) -> Result<Vec<OrderItem>, sqlx::Error> {
        let query = format!(
            "SELECT {ITEM_COLUMNS} FROM order_items
             WHERE order_id = $1
             ORDER BY created_at, id"
        );
        sqlx::query_as::<_, OrderItem>(&query)
            .bind(order_id)
            .fetch_all(pool)
            .await
    }

    /// Change quantity and/or unit price of an item. `total_price` is
    /// recomputed from the resulting pair.
    ///
    /// Returns `None` if no item with the given ID exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateOrderItem,
    ) -> Result<Option<OrderItem>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let current: Option<(i32, Decimal)> =
            sqlx::query_as("SELECT quantity, unit_price FROM order_items WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
        let Some((quantity, unit_price)) = current else {
            return Ok(None);
        };

        let quantity = input.quantity.unwrap_or(quantity);
        let unit_price = input.unit_price.unwrap_or(unit_price);

        let query = format!(
            "UPDATE order_items SET
                quantity = $2,
                unit_price = $3,
                total_price = $4,
                special_instructions = COALESCE($5, special_instructions)
             WHERE id = $1
             RETURNING {ITEM_COLUMNS}"
        );
        let item = sqlx::query_as::<_, OrderItem>(&query)
            .bind(id)
            .bind(quantity)
            .bind(unit_price)
            .bind(line_total(unit_price, quantity))
            .bind(&input.special_instructions)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(item))
    }
}
