//! Repository for the `orders` table, including transactional placement.

use std::collections::HashMap;

use chrono::Utc;
use furnicraft_core::error::CoreError;
use furnicraft_core::order::{check_stock, generate_order_number, StockLevel};
use furnicraft_core::pricing::{check_order_amount, compute_totals, line_total};
use furnicraft_core::search::{clamp_limit, clamp_offset, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};
use furnicraft_core::types::DbId;
use rust_decimal::Decimal;
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};

use crate::models::order::{
    NewOrder, Order, OrderDetail, OrderItem, OrderItemDetail, OrderListParams, UpdateOrderStatus,
};
use crate::models::product::ProductSummary;
use crate::repositories::order_item_repo::{OrderItemRepo, ITEM_COLUMNS};
use crate::repositories::ProductRepo;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, order_number, user_id, customer_info, shipping_address, \
                        billing_address, subtotal, tax, shipping, discount, total, status, \
                        payment_status, payment_method, notes, delivered_at, \
                        created_at, updated_at";

/// Why an order could not be placed.
///
/// `Rejected` carries a business outcome (unknown product, short stock) the
/// caller should report as a client error; `Database` is an infrastructure
/// failure. Either way nothing was written.
#[derive(Debug, thiserror::Error)]
pub enum PlaceOrderError {
    #[error(transparent)]
    Rejected(#[from] CoreError),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Product columns read under lock while placing an order.
#[derive(Debug, FromRow)]
struct LockedProduct {
    id: DbId,
    name: String,
    price: Decimal,
    stock_quantity: i32,
    in_stock: bool,
    images: Vec<String>,
}

/// A priced cart line, ready to insert.
struct PricedLine<'a> {
    product_id: DbId,
    quantity: i32,
    unit_price: Decimal,
    total_price: Decimal,
    customizations: Option<&'a serde_json::Value>,
    special_instructions: Option<&'a str>,
}

/// Provides placement, lookup and status updates for orders.
pub struct OrderRepo;

impl OrderRepo {
    // -----------------------------------------------------------------------
    // Placement
    // -----------------------------------------------------------------------

    /// Place an order: verify stock, price every line, write the header and
    /// items, and decrement stock, all in one transaction.
    ///
    /// Product rows are locked in id order so concurrent placements touching
    /// the same products cannot deadlock or oversell. Any error drops the
    /// transaction, rolling everything back.
    pub async fn place(pool: &PgPool, input: &NewOrder) -> Result<OrderDetail, PlaceOrderError> {
        let mut tx = pool.begin().await?;

        let mut product_ids: Vec<DbId> = input.items.iter().map(|l| l.product_id).collect();
        product_ids.sort_unstable();
        product_ids.dedup();

        let locked = sqlx::query_as::<_, LockedProduct>(
            "SELECT id, name, price, stock_quantity, in_stock, images
             FROM products
             WHERE id = ANY($1)
             ORDER BY id
             FOR UPDATE",
        )
        .bind(&product_ids)
        .fetch_all(&mut *tx)
        .await?;
        let products: HashMap<DbId, LockedProduct> =
            locked.into_iter().map(|p| (p.id, p)).collect();

        // Verify and price every line before writing anything.
        let mut reserved: HashMap<DbId, i32> = HashMap::new();
        let mut lines = Vec::with_capacity(input.items.len());
        let mut subtotal = Decimal::ZERO;

        for line in &input.items {
            let product = products.get(&line.product_id).ok_or_else(|| {
                CoreError::Validation(format!("Product with ID {} not found", line.product_id))
            })?;

            let already = reserved.entry(product.id).or_insert(0);
            check_stock(
                product.id,
                &product.name,
                StockLevel {
                    in_stock: product.in_stock,
                    stock_quantity: product.stock_quantity,
                },
                *already,
                line.quantity,
            )?;
            *already += line.quantity;

            let total_price = line_total(product.price, line.quantity);
            check_order_amount("Line total", total_price)?;
            subtotal += total_price;
            lines.push(PricedLine {
                product_id: product.id,
                quantity: line.quantity,
                unit_price: product.price,
                total_price,
                customizations: line.customizations.as_ref(),
                special_instructions: line.special_instructions.as_deref(),
            });
        }

        let totals = compute_totals(subtotal);
        check_order_amount("Order total", totals.total)?;
        let order_number = generate_order_number(Utc::now());

        let insert_order = format!(
            "INSERT INTO orders
                (order_number, user_id, customer_info, shipping_address, billing_address,
                 subtotal, tax, shipping, discount, total, payment_method, notes)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
             RETURNING {COLUMNS}"
        );
        let order = sqlx::query_as::<_, Order>(&insert_order)
            .bind(&order_number)
            .bind(input.user_id)
            .bind(Json(&input.customer_info))
            .bind(Json(&input.shipping_address))
            .bind(input.billing_address.as_ref().map(Json))
            .bind(totals.subtotal)
            .bind(totals.tax)
            .bind(totals.shipping)
            .bind(totals.discount)
            .bind(totals.total)
            .bind(&input.payment_method)
            .bind(&input.notes)
            .fetch_one(&mut *tx)
            .await?;

        let insert_item = format!(
            "INSERT INTO order_items
                (order_id, product_id, quantity, unit_price, total_price,
                 customizations, special_instructions)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {ITEM_COLUMNS}"
        );
        let mut items = Vec::with_capacity(lines.len());
        for line in &lines {
            let item = sqlx::query_as::<_, OrderItem>(&insert_item)
                .bind(order.id)
                .bind(line.product_id)
                .bind(line.quantity)
                .bind(line.unit_price)
                .bind(line.total_price)
                .bind(line.customizations)
                .bind(line.special_instructions)
                .fetch_one(&mut *tx)
                .await?;

            let decremented = sqlx::query(
                "UPDATE products SET stock_quantity = stock_quantity - $2
                 WHERE id = $1 AND stock_quantity >= $2",
            )
            .bind(line.product_id)
            .bind(line.quantity)
            .execute(&mut *tx)
            .await?;
            if decremented.rows_affected() == 0 {
                return Err(CoreError::BusinessRule(format!(
                    "Insufficient stock for product {}",
                    line.product_id
                ))
                .into());
            }

            let product = products.get(&line.product_id).map(|p| ProductSummary {
                id: p.id,
                name: p.name.clone(),
                price: p.price,
                images: p.images.clone(),
            });
            items.push(OrderItemDetail { item, product });
        }

        tx.commit().await?;

        tracing::info!(
            order_id = %order.id,
            order_number = %order.order_number,
            item_count = items.len(),
            total = %order.total,
            "Order placed",
        );

        Ok(OrderDetail { order, items })
    }

    // -----------------------------------------------------------------------
    // Lookup
    // -----------------------------------------------------------------------

    /// Find an order header by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Order>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM orders WHERE id = $1");
        sqlx::query_as::<_, Order>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an order header by its public order number.
    pub async fn find_by_number(
        pool: &PgPool,
        order_number: &str,
    ) -> Result<Option<Order>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM orders WHERE order_number = $1");
        sqlx::query_as::<_, Order>(&query)
            .bind(order_number)
            .fetch_optional(pool)
            .await
    }

    /// Load an order with its items and product summaries.
    pub async fn find_detail(pool: &PgPool, id: DbId) -> Result<Option<OrderDetail>, sqlx::Error> {
        let Some(order) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };
        let items = Self::with_products(pool, OrderItemRepo::list_for_order(pool, id).await?).await?;
        Ok(Some(OrderDetail { order, items }))
    }

    /// List orders newest first. `user_id` restricts to one customer's orders.
    pub async fn list(
        pool: &PgPool,
        user_id: Option<DbId>,
        params: &OrderListParams,
    ) -> Result<Vec<Order>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM orders
             WHERE ($1::uuid IS NULL OR user_id = $1)
               AND ($2::text IS NULL OR status = $2)
               AND ($3::text IS NULL OR payment_status = $3)
             ORDER BY created_at DESC
             LIMIT $4 OFFSET $5"
        );
        sqlx::query_as::<_, Order>(&query)
            .bind(user_id)
            .bind(&params.status)
            .bind(&params.payment_status)
            .bind(clamp_limit(params.limit, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT))
            .bind(clamp_offset(params.offset))
            .fetch_all(pool)
            .await
    }

    /// Update order / payment status. `delivered_at` is only written while
    /// the column is still `NULL`.
    pub async fn update_status(
        pool: &PgPool,
        id: DbId,
        input: &UpdateOrderStatus,
    ) -> Result<Option<Order>, sqlx::Error> {
        let query = format!(
            "UPDATE orders SET
                status = COALESCE($2, status),
                payment_status = COALESCE($3, payment_status),
                delivered_at = COALESCE(delivered_at, $4)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Order>(&query)
            .bind(id)
            .bind(&input.status)
            .bind(&input.payment_status)
            .bind(input.delivered_at)
            .fetch_optional(pool)
            .await
    }

    /// Attach product summaries to a batch of items with one query.
    async fn with_products(
        pool: &PgPool,
        items: Vec<OrderItem>,
    ) -> Result<Vec<OrderItemDetail>, sqlx::Error> {
        let ids: Vec<DbId> = items.iter().map(|i| i.product_id).collect();
        let summaries: HashMap<DbId, ProductSummary> = ProductRepo::summaries(pool, &ids)
            .await?
            .into_iter()
            .map(|s| (s.id, s))
            .collect();

        Ok(items
            .into_iter()
            .map(|item| {
                let product = summaries.get(&item.product_id).cloned();
                OrderItemDetail { item, product }
            })
            .collect())
    }
}
