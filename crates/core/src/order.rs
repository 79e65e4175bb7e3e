//! Order status constants, order-number generation and cart-line rules.

use rand::Rng;

use crate::error::CoreError;
use crate::types::{DbId, Timestamp};

/* --------------------------------------------------------------------------
Constants
-------------------------------------------------------------------------- */

pub const ORDER_STATUS_PENDING: &str = "pending";
pub const ORDER_STATUS_CONFIRMED: &str = "confirmed";
pub const ORDER_STATUS_PROCESSING: &str = "processing";
pub const ORDER_STATUS_SHIPPED: &str = "shipped";
pub const ORDER_STATUS_DELIVERED: &str = "delivered";
pub const ORDER_STATUS_CANCELLED: &str = "cancelled";
pub const ORDER_STATUS_REFUNDED: &str = "refunded";

/// All valid order statuses. Any status may follow any other.
pub const VALID_ORDER_STATUSES: &[&str] = &[
    ORDER_STATUS_PENDING,
    ORDER_STATUS_CONFIRMED,
    ORDER_STATUS_PROCESSING,
    ORDER_STATUS_SHIPPED,
    ORDER_STATUS_DELIVERED,
    ORDER_STATUS_CANCELLED,
    ORDER_STATUS_REFUNDED,
];

pub const PAYMENT_STATUS_PENDING: &str = "pending";
pub const PAYMENT_STATUS_PAID: &str = "paid";
pub const PAYMENT_STATUS_FAILED: &str = "failed";
pub const PAYMENT_STATUS_REFUNDED: &str = "refunded";

/// All valid payment statuses.
pub const VALID_PAYMENT_STATUSES: &[&str] = &[
    PAYMENT_STATUS_PENDING,
    PAYMENT_STATUS_PAID,
    PAYMENT_STATUS_FAILED,
    PAYMENT_STATUS_REFUNDED,
];

/// Prefix of every order number.
pub const ORDER_NUMBER_PREFIX: &str = "FC";

/// Upper bound (exclusive) of the random order-number suffix.
const ORDER_NUMBER_SUFFIX_RANGE: u32 = 1_000;

/* --------------------------------------------------------------------------
Validation
-------------------------------------------------------------------------- */

/// Validate that an order status is one of the accepted values.
pub fn validate_order_status(status: &str) -> Result<(), CoreError> {
    if VALID_ORDER_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid order status '{status}'. Must be one of: {}",
            VALID_ORDER_STATUSES.join(", ")
        )))
    }
}

/// Validate that a payment status is one of the accepted values.
pub fn validate_payment_status(status: &str) -> Result<(), CoreError> {
    if VALID_PAYMENT_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid payment status '{status}'. Must be one of: {}",
            VALID_PAYMENT_STATUSES.join(", ")
        )))
    }
}

/* --------------------------------------------------------------------------
Order numbers
-------------------------------------------------------------------------- */

/// Format an order number: `FC-<epoch-ms>-<3-digit zero padded suffix>`.
pub fn format_order_number(created_at: Timestamp, suffix: u32) -> String {
    format!(
        "{ORDER_NUMBER_PREFIX}-{}-{:03}",
        created_at.timestamp_millis(),
        suffix % ORDER_NUMBER_SUFFIX_RANGE
    )
}

/// Generate a fresh order number with a random suffix.
///
/// Collisions are possible within the same millisecond and are caught by the
/// `uq_orders_order_number` constraint.
pub fn generate_order_number(now: Timestamp) -> String {
    let suffix = rand::rng().random_range(0..ORDER_NUMBER_SUFFIX_RANGE);
    format_order_number(now, suffix)
}

/* --------------------------------------------------------------------------
Cart lines
-------------------------------------------------------------------------- */

/// Stock-relevant fields of a product, as seen while placing an order.
#[derive(Debug, Clone, Copy)]
pub struct StockLevel {
    pub in_stock: bool,
    pub stock_quantity: i32,
}

/// Reject a line whose product is unavailable or short on stock.
///
/// `already_reserved` counts units of the same product claimed by earlier
/// lines of the same cart.
pub fn check_stock(
    product_id: DbId,
    product_name: &str,
    stock: StockLevel,
    already_reserved: i32,
    requested: i32,
) -> Result<(), CoreError> {
    if !stock.in_stock {
        return Err(CoreError::BusinessRule(format!(
            "Product '{product_name}' ({product_id}) is out of stock"
        )));
    }

    let available = stock.stock_quantity - already_reserved;
    if available < requested {
        return Err(CoreError::BusinessRule(format!(
            "Insufficient stock for product '{product_name}' ({product_id}): \
             requested {requested}, available {available}"
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    use super::*;

    #[test]
    fn order_number_format() {
        let ts = Utc.timestamp_millis_opt(1_700_000_000_123).unwrap();
        assert_eq!(format_order_number(ts, 7), "FC-1700000000123-007");
        assert_eq!(format_order_number(ts, 999), "FC-1700000000123-999");
    }

    #[test]
    fn generated_order_number_shape() {
        let now = Utc::now();
        let number = generate_order_number(now);
        let parts: Vec<&str> = number.split('-').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "FC");
        assert_eq!(parts[1], now.timestamp_millis().to_string());
        assert_eq!(parts[2].len(), 3);
        assert!(parts[2].chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn status_validation() {
        assert!(validate_order_status("shipped").is_ok());
        assert!(validate_order_status("lost").is_err());
        assert!(validate_payment_status("paid").is_ok());
        assert!(validate_payment_status("shipped").is_err());
    }

    #[test]
    fn stock_check_passes_when_enough() {
        let stock = StockLevel {
            in_stock: true,
            stock_quantity: 10,
        };
        assert!(check_stock(Uuid::new_v4(), "Sofa", stock, 0, 10).is_ok());
    }

    #[test]
    fn stock_check_rejects_shortfall() {
        let stock = StockLevel {
            in_stock: true,
            stock_quantity: 3,
        };
        assert_matches!(
            check_stock(Uuid::new_v4(), "Sofa", stock, 0, 4),
            Err(CoreError::BusinessRule(_))
        );
    }

    #[test]
    fn stock_check_counts_earlier_lines() {
        let stock = StockLevel {
            in_stock: true,
            stock_quantity: 5,
        };
        assert!(check_stock(Uuid::new_v4(), "Sofa", stock, 3, 2).is_ok());
        assert!(check_stock(Uuid::new_v4(), "Sofa", stock, 3, 3).is_err());
    }

    #[test]
    fn stock_check_rejects_out_of_stock_flag() {
        let stock = StockLevel {
            in_stock: false,
            stock_quantity: 50,
        };
        assert_matches!(
            check_stock(Uuid::new_v4(), "Sofa", stock, 0, 1),
            Err(CoreError::BusinessRule(msg)) if msg.contains("out of stock")
        );
    }
}
