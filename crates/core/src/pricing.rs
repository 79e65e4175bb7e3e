//! Order pricing: line totals, tax and shipping.
//!
//! Rates are flat (no per-jurisdiction tax). All amounts are stored with two
//! decimal places.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::CoreError;

/// Sales tax rate applied to the subtotal (8%).
pub const TAX_RATE: Decimal = Decimal::from_parts(8, 0, 0, false, 2);

/// Subtotals strictly above this amount ship free.
pub const FREE_SHIPPING_THRESHOLD: Decimal = Decimal::from_parts(50_000, 0, 0, false, 2);

/// Flat shipping charge for orders at or below the threshold.
pub const FLAT_SHIPPING_FEE: Decimal = Decimal::from_parts(5_000, 0, 0, false, 2);

/// Largest amount a `NUMERIC(10, 2)` money column holds: 99,999,999.99.
pub const MAX_MONEY: Decimal = Decimal::from_parts(1_410_065_407, 2, 0, false, 2);

/// Computed monetary totals of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderTotals {
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub shipping: Decimal,
    pub discount: Decimal,
    pub total: Decimal,
}

/// Round a monetary amount to cents, half away from zero.
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// `quantity * unit_price`, rounded to cents.
pub fn line_total(unit_price: Decimal, quantity: i32) -> Decimal {
    round_money(unit_price * Decimal::from(quantity))
}

/// Shipping charge for a given subtotal.
pub fn shipping_for(subtotal: Decimal) -> Decimal {
    if subtotal > FREE_SHIPPING_THRESHOLD {
        Decimal::ZERO
    } else {
        FLAT_SHIPPING_FEE
    }
}

/// Validate a catalogue price: non-negative, at most two decimal places and
/// no larger than [`MAX_MONEY`].
pub fn validate_price(price: Decimal) -> Result<(), CoreError> {
    if price.is_sign_negative() && !price.is_zero() {
        return Err(CoreError::Validation("Price must not be negative".into()));
    }
    if price.normalize().scale() > 2 {
        return Err(CoreError::Validation(
            "Price must have at most 2 decimal places".into(),
        ));
    }
    if price > MAX_MONEY {
        return Err(CoreError::Validation(format!(
            "Price must not exceed {MAX_MONEY}"
        )));
    }
    Ok(())
}

/// Reject an order amount (line or grand total) that cannot be stored.
pub fn check_order_amount(what: &str, amount: Decimal) -> Result<(), CoreError> {
    if amount > MAX_MONEY {
        return Err(CoreError::BusinessRule(format!(
            "{what} {amount} exceeds the maximum order amount of {MAX_MONEY}"
        )));
    }
    Ok(())
}

/// Derive tax, shipping and total from a subtotal. No discount is applied.
pub fn compute_totals(subtotal: Decimal) -> OrderTotals {
    let subtotal = round_money(subtotal);
    let tax = round_money(subtotal * TAX_RATE);
    let shipping = shipping_for(subtotal);
    let discount = Decimal::ZERO;

    OrderTotals {
        subtotal,
        tax,
        shipping,
        discount,
        total: subtotal + tax + shipping - discount,
    }
}
