//! Order and order-item models and DTOs.

use furnicraft_core::types::{DbId, Timestamp};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use validator::Validate;

use crate::models::product::ProductSummary;

// ---------------------------------------------------------------------------
// JSONB payloads
// ---------------------------------------------------------------------------

/// Buyer contact details stored in `orders.customer_info`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct CustomerInfo {
    #[validate(length(min = 1, max = 200, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "A valid email address is required"))]
    pub email: String,
    #[validate(length(max = 50))]
    pub phone: Option<String>,
}

/// Postal address stored in `orders.shipping_address` / `billing_address`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Address {
    #[validate(length(min = 1, message = "Street is required"))]
    pub street: String,
    #[validate(length(min = 1, message = "City is required"))]
    pub city: String,
    #[validate(length(min = 1, message = "State is required"))]
    pub state: String,
    #[validate(length(min = 1, message = "Zip code is required"))]
    pub zip_code: String,
    pub country: Option<String>,
}

// ---------------------------------------------------------------------------
// Entity structs (database rows)
// ---------------------------------------------------------------------------

/// A row from the `orders` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Order {
    pub id: DbId,
    pub order_number: String,
    pub user_id: Option<DbId>,
    pub customer_info: Json<CustomerInfo>,
    pub shipping_address: Json<Address>,
    pub billing_address: Option<Json<Address>>,
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub shipping: Decimal,
    pub discount: Decimal,
    pub total: Decimal,
    pub status: String,
    pub payment_status: String,
    pub payment_method: Option<String>,
    pub notes: Option<String>,
    pub delivered_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `order_items` table.
///
/// `total_price` is always `quantity * unit_price`; every write path
/// recomputes it.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct OrderItem {
    pub id: DbId,
    pub order_id: DbId,
    pub product_id: DbId,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub total_price: Decimal,
    pub customizations: Option<serde_json::Value>,
    pub special_instructions: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// An order item with a summary of the purchased product.
#[derive(Debug, Clone, Serialize)]
pub struct OrderItemDetail {
    #[serde(flatten)]
    pub item: OrderItem,
    pub product: Option<ProductSummary>,
}

/// An order with all of its items.
#[derive(Debug, Clone, Serialize)]
pub struct OrderDetail {
    #[serde(flatten)]
    pub order: Order,
    pub items: Vec<OrderItemDetail>,
}

/// One line of an [`OrderTracking`] view.
#[derive(Debug, Clone, Serialize)]
pub struct TrackedItem {
    pub product_id: DbId,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub total_price: Decimal,
    pub product: Option<ProductSummary>,
}

/// What anyone holding an order number may see.
///
/// Carries no customer contact details, addresses, notes or user link.
#[derive(Debug, Clone, Serialize)]
pub struct OrderTracking {
    pub order_number: String,
    pub status: String,
    pub payment_status: String,
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub shipping: Decimal,
    pub discount: Decimal,
    pub total: Decimal,
    pub delivered_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub items: Vec<TrackedItem>,
}

impl From<OrderDetail> for OrderTracking {
    fn from(detail: OrderDetail) -> Self {
        let OrderDetail { order, items } = detail;
        Self {
            order_number: order.order_number,
            status: order.status,
            payment_status: order.payment_status,
            subtotal: order.subtotal,
            tax: order.tax,
            shipping: order.shipping,
            discount: order.discount,
            total: order.total,
            delivered_at: order.delivered_at,
            created_at: order.created_at,
            items: items
                .into_iter()
                .map(|line| TrackedItem {
                    product_id: line.item.product_id,
                    quantity: line.item.quantity,
                    unit_price: line.item.unit_price,
                    total_price: line.item.total_price,
                    product: line.product,
                })
                .collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

/// One cart line submitted for placement.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewOrderLine {
    pub product_id: DbId,
    #[validate(range(min = 1, max = 1000, message = "Quantity must be between 1 and 1000"))]
    pub quantity: i32,
    pub customizations: Option<serde_json::Value>,
    #[validate(length(max = 1000))]
    pub special_instructions: Option<String>,
}

/// A cart submitted for placement. Prices are never taken from the client.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewOrder {
    #[serde(skip)]
    pub user_id: Option<DbId>,
    #[validate(nested)]
    pub customer_info: CustomerInfo,
    #[validate(nested)]
    pub shipping_address: Address,
    #[validate(nested)]
    pub billing_address: Option<Address>,
    #[validate(length(min = 1, message = "Order must contain at least one item"), nested)]
    pub items: Vec<NewOrderLine>,
    #[validate(length(max = 50))]
    pub payment_method: Option<String>,
    #[validate(length(max = 2000))]
    pub notes: Option<String>,
}

/// DTO for the staff status update. `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateOrderStatus {
    pub status: Option<String>,
    pub payment_status: Option<String>,
    pub delivered_at: Option<Timestamp>,
}

/// DTO for repricing a single order item.
#[derive(Debug, Clone, Default)]
pub struct UpdateOrderItem {
    pub quantity: Option<i32>,
    pub unit_price: Option<Decimal>,
    pub special_instructions: Option<String>,
}

/// Query parameters for `GET /api/v1/orders`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrderListParams {
    pub status: Option<String>,
    pub payment_status: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use validator::Validate;

    use super::*;

    fn cart(items: serde_json::Value) -> NewOrder {
        serde_json::from_value(json!({
            "customer_info": { "name": "Ana", "email": "ana@example.com" },
            "shipping_address": {
                "street": "12 Elm St",
                "city": "Portland",
                "state": "OR",
                "zip_code": "97201"
            },
            "items": items,
        }))
        .unwrap()
    }

    #[test]
    fn empty_cart_fails_validation() {
        let errors = cart(json!([])).validate().unwrap_err();
        assert!(errors.field_errors().contains_key("items"));
    }

    #[test]
    fn line_quantity_is_bounded() {
        let id = uuid::Uuid::new_v4();
        assert!(cart(json!([{ "product_id": id, "quantity": 1000 }])).validate().is_ok());
        assert!(cart(json!([{ "product_id": id, "quantity": 1001 }])).validate().is_err());
        assert!(cart(json!([{ "product_id": id, "quantity": 0 }])).validate().is_err());
    }

    #[test]
    fn client_unit_price_is_not_part_of_a_line() {
        let order = cart(json!([{
            "product_id": uuid::Uuid::new_v4(),
            "quantity": 2,
            "unit_price": "0.01",
        }]));
        let line = serde_json::to_value(&order.items[0]).unwrap();
        assert!(line.get("unit_price").is_none());
        assert_eq!(line["quantity"], 2);
    }
}
